use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;

use smartkempapura_core::Debouncer;

/// Debounced viewport-resize handler. Every event replaces the pending
/// timer, so only the last width of a burst reaches `on_settled`.
pub(crate) struct ResizeDebounce {
    debouncer: Rc<RefCell<Debouncer<f64>>>,
    timer: RefCell<Option<Timeout>>,
    on_settled: Rc<dyn Fn(f64)>,
}

impl ResizeDebounce {
    pub(crate) fn new(debouncer: Debouncer<f64>, on_settled: Rc<dyn Fn(f64)>) -> Self {
        Self {
            debouncer: Rc::new(RefCell::new(debouncer)),
            timer: RefCell::new(None),
            on_settled,
        }
    }

    pub(crate) fn push(&self, width: f64) {
        let wait_ms = {
            let mut debouncer = self.debouncer.borrow_mut();
            debouncer.push(width);
            debouncer.wait_ms()
        };
        let debouncer = self.debouncer.clone();
        let on_settled = self.on_settled.clone();
        let timer = Timeout::new(wait_ms, move || {
            let settled = debouncer.borrow_mut().flush();
            if let Some(width) = settled {
                on_settled(width);
            }
        });
        // Dropping the previous timeout cancels it.
        *self.timer.borrow_mut() = Some(timer);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn recorder(wait_ms: u32) -> (ResizeDebounce, Rc<RefCell<Vec<f64>>>) {
        let settled = Rc::new(RefCell::new(Vec::new()));
        let sink = settled.clone();
        let resize = ResizeDebounce::new(
            Debouncer::new(wait_ms),
            Rc::new(move |width| sink.borrow_mut().push(width)),
        );
        (resize, settled)
    }

    #[wasm_bindgen_test(async)]
    async fn burst_settles_once_with_last_width() {
        let (resize, settled) = recorder(250);
        for width in [500.0, 620.0, 700.0, 900.0, 1024.0] {
            resize.push(width);
            TimeoutFuture::new(40).await;
        }
        assert!(settled.borrow().is_empty());

        TimeoutFuture::new(400).await;
        assert_eq!(*settled.borrow(), vec![1024.0]);
    }

    #[wasm_bindgen_test(async)]
    async fn bursts_apart_settle_separately() {
        let (resize, settled) = recorder(50);
        resize.push(600.0);
        TimeoutFuture::new(150).await;
        resize.push(800.0);
        resize.push(900.0);
        TimeoutFuture::new(150).await;
        assert_eq!(*settled.borrow(), vec![600.0, 900.0]);
    }
}
