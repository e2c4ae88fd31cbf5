/// Blocking confirmation and alert prompts.
pub trait Dialogs {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Native `window.confirm` / `window.alert`.
#[derive(Clone, Copy, Default)]
pub struct BrowserDialogs;

impl Dialogs for BrowserDialogs {
    fn confirm(&self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(message);
        }
    }
}

#[cfg(test)]
pub use scripted::ScriptedDialogs;

#[cfg(test)]
mod scripted {
    use super::Dialogs;
    use std::cell::RefCell;

    /// Answers every confirm with a fixed value and records what was shown.
    #[derive(Default)]
    pub struct ScriptedDialogs {
        answer: bool,
        pub confirms: RefCell<Vec<String>>,
        pub alerts: RefCell<Vec<String>>,
    }

    impl ScriptedDialogs {
        pub fn accepting() -> Self {
            Self {
                answer: true,
                ..Default::default()
            }
        }

        pub fn declining() -> Self {
            Self::default()
        }

        pub fn alerts(&self) -> Vec<String> {
            self.alerts.borrow().clone()
        }

        pub fn confirms(&self) -> Vec<String> {
            self.confirms.borrow().clone()
        }
    }

    impl Dialogs for ScriptedDialogs {
        fn confirm(&self, message: &str) -> bool {
            self.confirms.borrow_mut().push(message.to_string());
            self.answer
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }
}
