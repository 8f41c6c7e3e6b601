pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

#[derive(Clone, Debug, PartialEq)]
pub struct MobileMenu {
    open: bool,
    breakpoint_px: f64,
}

impl Default for MobileMenu {
    fn default() -> Self {
        Self::new(MOBILE_BREAKPOINT_PX)
    }
}

impl MobileMenu {
    pub fn new(breakpoint_px: f64) -> Self {
        Self {
            open: false,
            breakpoint_px,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Returns whether the menu was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    pub fn on_nav_link(&mut self) -> bool {
        self.close()
    }

    pub fn on_document_click(&mut self, inside_nav: bool, inside_toggle: bool) -> bool {
        if inside_nav || inside_toggle {
            return false;
        }
        self.close()
    }

    pub fn on_resize(&mut self, viewport_width: f64) -> bool {
        if viewport_width > self.breakpoint_px {
            self.close()
        } else {
            false
        }
    }

    /// Keyboard activation of the toggle; returns true when the key was
    /// consumed.
    pub fn on_toggle_key(&mut self, key: &str) -> bool {
        if matches!(key, "Enter" | " ") {
            self.toggle();
            true
        } else {
            false
        }
    }
}
