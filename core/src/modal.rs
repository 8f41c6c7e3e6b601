pub const SUCCESS_MODAL_ID: &str = "successModal";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SuccessModal {
    visible: bool,
}

impl SuccessModal {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Page scrolling is locked while the modal is up.
    pub fn locks_scroll(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    pub fn on_key(&mut self, key: &str) -> bool {
        key == "Escape" && self.hide()
    }

    pub fn on_backdrop_click(&mut self, target_is_backdrop: bool) -> bool {
        target_is_backdrop && self.hide()
    }
}
