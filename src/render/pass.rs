//! Render pass: the single-threaded entry point for a frame.
//!
//! One pass performs the whole measure + arrange + paint traversal as plain
//! synchronous recursion. The pass records the thread it started on and
//! panics if any entry point runs elsewhere, catching accidental
//! cross-thread UI mutation from caller code. There is no internal
//! parallelism and no locking; the buffer is exclusively owned for the
//! duration of one `render` call.

use std::thread::{self, ThreadId};

use crate::css::cascade::CompiledStylesheet;
use crate::element::measure::{self, StyleContext};
use crate::element::render::render_element;
use crate::element::Element;
use crate::geometry::Rect;
use crate::render::buffer::Buffer;

/// A frame's render pass over one element tree and stylesheet.
pub struct RenderPass<'s> {
    sheet: &'s CompiledStylesheet,
    thread: ThreadId,
}

impl<'s> RenderPass<'s> {
    /// Begin a pass. The calling thread becomes the render thread for the
    /// pass's lifetime.
    pub fn new(sheet: &'s CompiledStylesheet) -> Self {
        Self {
            sheet,
            thread: thread::current().id(),
        }
    }

    /// Panics if called from any thread other than the one that began the
    /// pass. Programmer error, deliberately loud.
    pub fn assert_render_thread(&self) {
        let current = thread::current().id();
        assert_eq!(
            current, self.thread,
            "render pass used from thread {current:?}, but it began on {self_thread:?}; \
             UI layout and painting must stay on one thread per pass",
            self_thread = self.thread,
        );
    }

    /// Render `root` into `area` of the buffer.
    pub fn render(&self, root: &Element, area: Rect, buf: &mut Buffer) {
        self.assert_render_thread();
        let mut ctx = StyleContext::new(self.sheet);
        render_element(root, area, &mut ctx, buf);
    }

    /// Preferred width of an element under this pass's stylesheet.
    pub fn preferred_width(&self, element: &Element) -> i32 {
        self.assert_render_thread();
        measure::preferred_width(element, &mut StyleContext::new(self.sheet))
    }

    /// Preferred height at `available_width` under this pass's stylesheet.
    pub fn preferred_height(&self, element: &Element, available_width: i32) -> i32 {
        self.assert_render_thread();
        measure::preferred_height(element, available_width, &mut StyleContext::new(self.sheet))
    }
}

/// One-shot convenience: start a pass and render the tree.
pub fn render(root: &Element, sheet: &CompiledStylesheet, area: Rect, buf: &mut Buffer) {
    RenderPass::new(sheet).render(root, area, buf);
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_sheet() -> CompiledStylesheet {
        CompiledStylesheet::parse("").unwrap()
    }

    #[test]
    fn render_writes_into_buffer() {
        let sheet = empty_sheet();
        let mut buf = Buffer::new(5, 1);
        render(&Element::text("ok"), &sheet, buf.area(), &mut buf);
        assert_eq!(buf.get(0, 0).unwrap().symbol, 'o');
        assert_eq!(buf.get(1, 0).unwrap().symbol, 'k');
    }

    #[test]
    fn pass_measures_with_stylesheet() {
        let sheet = CompiledStylesheet::parse("Text { width: 9; }").unwrap();
        let pass = RenderPass::new(&sheet);
        assert_eq!(pass.preferred_width(&Element::text("ab")), 9);
    }

    #[test]
    fn same_thread_assertion_passes() {
        let sheet = empty_sheet();
        let pass = RenderPass::new(&sheet);
        pass.assert_render_thread();
    }

    #[test]
    fn cross_thread_use_panics() {
        let sheet = empty_sheet();
        let pass = RenderPass::new(&sheet);
        std::thread::scope(|scope| {
            let handle = scope.spawn(|| {
                let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    pass.assert_render_thread();
                }));
                assert!(result.is_err());
            });
            handle.join().unwrap();
        });
    }
}
