//! Scroll-to-top ("top-up") button controller.

use tracing::debug;

use crate::markup::escape_html;

/// Default scroll offset above which the button is shown.
pub const DEFAULT_THRESHOLD: f64 = 100.0;

/// How the viewport moves when scrolled programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// The button and viewport the controller drives.
pub trait ScrollHost {
    fn set_button_visible(&mut self, visible: bool);
    fn scroll_viewport_to(&mut self, top: f64, behavior: ScrollBehavior);
}

/// Whether the button should be visible at `offset`.
pub fn button_visible(offset: f64, threshold: f64) -> bool {
    offset > threshold
}

/// Shows the button past the threshold and scrolls to the top on activation.
#[derive(Debug)]
pub struct ScrollToTop<H: ScrollHost> {
    host: H,
    threshold: f64,
    visible: bool,
}

impl<H: ScrollHost> ScrollToTop<H> {
    /// Attach to a button, hiding it.
    ///
    /// Returns `None` when there is no button to control.
    pub fn attach(button: Option<H>, threshold: f64) -> Option<Self> {
        let Some(mut host) = button else {
            debug!(name: "scroll.skipped", "No top-up button");
            return None;
        };
        host.set_button_visible(false);
        Some(Self {
            host,
            threshold,
            visible: false,
        })
    }

    /// React to a scroll event. Returns the resulting visibility.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        let visible = button_visible(offset, self.threshold);
        if visible != self.visible {
            self.visible = visible;
            self.host.set_button_visible(visible);
        }
        visible
    }

    /// The button was activated.
    pub fn activate(&mut self) {
        self.host.scroll_viewport_to(0.0, ScrollBehavior::Smooth);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

/// Server-rendered top-up button.
#[derive(Debug, Clone, Default)]
pub struct HtmlScrollButton {
    visible: bool,
    scroll_top: Option<f64>,
}

impl HtmlScrollButton {
    /// Render the button; hidden buttons carry `display:none`.
    ///
    /// `threshold` is carried as `data-threshold` for the page script.
    pub fn render(&self, label: &str, threshold: f64) -> String {
        let style = if self.visible {
            "display:block"
        } else {
            "display:none"
        };
        format!(
            r##"<a id="top-up-btn" class="top-up-btn" href="#top" style="{style}" data-threshold="{threshold}" aria-label="Back to top">{}</a>"##,
            escape_html(label)
        )
    }

    /// Target offset of the last programmatic scroll.
    pub fn scroll_top(&self) -> Option<f64> {
        self.scroll_top
    }
}

impl ScrollHost for HtmlScrollButton {
    fn set_button_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn scroll_viewport_to(&mut self, top: f64, _behavior: ScrollBehavior) {
        self.scroll_top = Some(top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Host {
        visibility: Vec<bool>,
        scrolls: Vec<(f64, ScrollBehavior)>,
    }

    impl ScrollHost for Host {
        fn set_button_visible(&mut self, visible: bool) {
            self.visibility.push(visible);
        }
        fn scroll_viewport_to(&mut self, top: f64, behavior: ScrollBehavior) {
            self.scrolls.push((top, behavior));
        }
    }

    #[test]
    fn test_visibility_threshold() {
        assert!(!button_visible(0.0, DEFAULT_THRESHOLD));
        assert!(!button_visible(100.0, DEFAULT_THRESHOLD));
        assert!(button_visible(100.5, DEFAULT_THRESHOLD));
        assert!(button_visible(2000.0, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_hidden_on_attach_and_toggles() {
        let mut ctl = ScrollToTop::attach(Some(Host::default()), DEFAULT_THRESHOLD).unwrap();
        assert!(!ctl.is_visible());

        assert!(ctl.on_scroll(150.0));
        assert!(ctl.on_scroll(300.0));
        assert!(!ctl.on_scroll(50.0));

        assert_eq!(ctl.host().visibility, vec![false, true, false]);
    }

    #[test]
    fn test_activate_scrolls_smoothly_to_top() {
        let mut ctl = ScrollToTop::attach(Some(Host::default()), DEFAULT_THRESHOLD).unwrap();
        ctl.on_scroll(500.0);
        ctl.activate();
        assert_eq!(ctl.host().scrolls, vec![(0.0, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn test_absent_button() {
        assert!(ScrollToTop::<Host>::attach(None, DEFAULT_THRESHOLD).is_none());
    }

    #[test]
    fn test_html_button() {
        let mut ctl =
            ScrollToTop::attach(Some(HtmlScrollButton::default()), DEFAULT_THRESHOLD).unwrap();
        let hidden = ctl.host().render("↑", ctl.threshold());
        assert!(hidden.contains("display:none"));
        assert!(hidden.contains(r#"data-threshold="100""#));

        ctl.on_scroll(101.0);
        assert!(ctl.host().render("↑", ctl.threshold()).contains("display:block"));

        ctl.activate();
        assert_eq!(ctl.host().scroll_top(), Some(0.0));
    }
}
