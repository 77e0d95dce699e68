//! Window-wide keyboard hooks

use eframe::egui;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Registry of installed hooks. Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct KeyHooks {
    installed: Arc<AtomicUsize>,
}

impl KeyHooks {
    pub fn install(&self) -> EscapeHook {
        self.installed.fetch_add(1, Ordering::SeqCst);
        EscapeHook {
            registry: self.installed.clone(),
        }
    }

    /// Number of hooks currently alive
    pub fn installed(&self) -> usize {
        self.installed.load(Ordering::SeqCst)
    }
}

/// Escape listener. Deregisters itself when dropped.
pub struct EscapeHook {
    registry: Arc<AtomicUsize>,
}

impl EscapeHook {
    /// Consume an Escape press from this frame's input, whatever has focus.
    pub fn pressed(&self, ctx: &egui::Context) -> bool {
        ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Escape))
    }
}

impl Drop for EscapeHook {
    fn drop(&mut self) {
        self.registry.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_deregisters_on_drop() {
        let hooks = KeyHooks::default();
        let first = hooks.install();
        let second = hooks.clone().install();
        assert_eq!(hooks.installed(), 2);

        drop(first);
        assert_eq!(hooks.installed(), 1);
        drop(second);
        assert_eq!(hooks.installed(), 0);
    }
}
