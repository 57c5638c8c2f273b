//! Deferred structural mutation.
//!
//! Nothing mutates a panel's child list while the tree is being walked.
//! Callbacks queue closures on [`Commands`]; other threads post them through a
//! [`TreeProxy`]. Both queues are drained by [`WidgetTree::sync`], which runs at
//! the start of every update.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::tree::WidgetTree;
use crate::widget::{Widget, WidgetHandle};

/// A deferred tree mutation.
pub type TreeOp = Box<dyn FnOnce(&mut WidgetTree) + Send>;

/// Main-thread queue of tree operations.
#[derive(Default)]
pub struct Commands {
    ops: Vec<TreeOp>,
}

impl Commands {
    pub fn push(&mut self, op: impl FnOnce(&mut WidgetTree) + Send + 'static) {
        self.ops.push(Box::new(op));
    }

    pub fn remove_widget(&mut self, handle: WidgetHandle) {
        self.push(move |tree| {
            tree.remove_widget(handle);
        });
    }

    pub fn add_widget(&mut self, parent: WidgetHandle, widget: Widget, x: f32, y: f32, z_level: i32) {
        self.push(move |tree| {
            tree.add_widget(parent, widget, x, y, z_level);
        });
    }

    pub fn set_visible(&mut self, handle: WidgetHandle, visible: bool) {
        self.push(move |tree| {
            if let Some(base) = tree.base_mut(handle) {
                base.is_visible = visible;
            }
        });
    }

    pub fn set_keyboard_focus(&mut self, handle: Option<WidgetHandle>) {
        self.push(move |tree| {
            tree.set_keyboard_focus(handle);
        });
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub(crate) fn take(&mut self) -> Vec<TreeOp> {
        std::mem::take(&mut self.ops)
    }
}

impl std::fmt::Debug for Commands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Commands").field("len", &self.ops.len()).finish()
    }
}

/// Thread-safe handle for queuing tree operations from anywhere.
///
/// ```
/// use lucent_ui::{Theme, WidgetTree};
///
/// let mut tree = WidgetTree::new(Theme::dark());
/// let proxy = tree.proxy();
///
/// std::thread::spawn(move || {
///     proxy.post(|tree| tree.set_viewport_size(640.0, 480.0));
/// })
/// .join()
/// .unwrap();
///
/// tree.sync();
/// assert_eq!(tree.base(tree.root()).map(|b| b.width()), Some(640.0));
/// ```
#[derive(Clone, Default)]
pub struct TreeProxy {
    queue: Arc<Mutex<Vec<TreeOp>>>,
}

impl TreeProxy {
    pub fn post(&self, op: impl FnOnce(&mut WidgetTree) + Send + 'static) {
        self.queue.lock().push(Box::new(op));
    }

    /// Operations posted but not yet applied.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    pub(crate) fn drain(&self) -> Vec<TreeOp> {
        std::mem::take(&mut *self.queue.lock())
    }
}

impl std::fmt::Debug for TreeProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeProxy")
            .field("pending", &self.pending())
            .finish()
    }
}
