//! Structural behaviour of the widget tree: staging, z-order, ownership and sizing.

use std::sync::Arc;

use lucent_core::geometry::Size;
use lucent_ui::{EventKind, ReleaseOutcome, Theme, Widget, WidgetHandle, WidgetTree};
use parking_lot::Mutex;

fn setup() -> WidgetTree {
    let mut tree = WidgetTree::new(Theme::dark());
    tree.set_viewport_size(800.0, 600.0);
    tree
}

fn square(size: f32) -> Widget {
    Widget::panel().sized(size, size)
}

#[test]
fn test_highest_z_level_wins_hit_test() {
    let mut tree = setup();
    let root = tree.root();
    let top = tree.add_widget(root, square(100.0), 10.0, 10.0, 2).unwrap();
    let bottom = tree.add_widget(root, square(100.0), 10.0, 10.0, 0).unwrap();
    let middle = tree.add_widget(root, square(100.0), 10.0, 10.0, 1).unwrap();
    tree.update(0);

    assert_eq!(tree.find_widget(50.0, 50.0, false), Some(top));
    assert_eq!(tree.find_widget(500.0, 500.0, false), None);

    tree.set_z_level(bottom, 5);
    assert_eq!(tree.find_widget(50.0, 50.0, false), Some(bottom));

    tree.base_mut(bottom).unwrap().is_visible = false;
    tree.set_z_level(top, -1);
    assert_eq!(tree.find_widget(50.0, 50.0, false), Some(middle));
}

#[test]
fn test_hit_test_descends_into_nested_panels() {
    let mut tree = setup();
    let root = tree.root();
    let outer = tree.add_widget(root, square(200.0), 100.0, 100.0, 0).unwrap();
    let inner = tree.add_widget(outer, square(20.0), 50.0, 50.0, 0).unwrap();
    tree.update(0);

    assert_eq!(tree.find_widget(160.0, 160.0, false), Some(inner));
    assert_eq!(tree.find_widget(110.0, 110.0, false), Some(outer));
    assert_eq!(tree.base(inner).unwrap().screen_pos().x, 150.0);
}

#[test]
fn test_require_hover_skips_disabled_widgets() {
    let mut tree = setup();
    let root = tree.root();
    let under = tree.add_widget(root, square(100.0), 0.0, 0.0, 0).unwrap();
    tree.add_widget(root, square(100.0).hover_enabled(false), 0.0, 0.0, 1)
        .unwrap();
    tree.update(0);

    assert_ne!(tree.find_widget(10.0, 10.0, false), Some(under));
    assert_eq!(tree.find_widget(10.0, 10.0, true), Some(under));
}

#[test]
fn test_equal_z_levels_keep_insertion_order() {
    let mut tree = setup();
    let root = tree.root();
    let first = tree.add_widget(root, square(10.0), 0.0, 0.0, 0).unwrap();
    let second = tree.add_widget(root, square(10.0), 0.0, 0.0, 0).unwrap();
    tree.update(0);

    assert_eq!(tree.children(root), &[first, second]);
    assert_eq!(tree.find_widget(5.0, 5.0, false), Some(second));
}

#[test]
fn test_remove_from_callback_is_deferred_to_sync() {
    let mut tree = setup();
    let root = tree.root();
    let target = tree.add_widget(root, square(50.0), 0.0, 0.0, 0).unwrap();
    tree.on(target, EventKind::MouseEnter, |ctx| {
        let widget = ctx.widget;
        ctx.commands.remove_widget(widget);
    });
    tree.update(0);

    tree.process_input(&lucent_test_utils::input::hover(10.0, 10.0, 0));
    assert!(tree.is_live(target));
    assert_eq!(tree.commands().len(), 1);

    tree.update(16);
    assert!(!tree.contains(target));
    assert!(tree.children(root).is_empty());
}

#[test]
fn test_destroy_delay_counts_down() {
    let mut tree = setup();
    let root = tree.root();
    let toast = tree.add_widget(root, square(10.0), 0.0, 0.0, 0).unwrap();
    tree.update(0);
    tree.base_mut(toast).unwrap().set_destroy_delay(100);

    tree.update(60);
    assert!(tree.is_live(toast));
    tree.update(50);
    assert!(!tree.is_live(toast));
    assert!(tree.contains(toast));

    tree.update(0);
    assert!(!tree.contains(toast));
}

#[test]
fn test_retained_widget_outlives_removal() {
    let mut tree = setup();
    let root = tree.root();
    let child = tree.add_widget(root, square(10.0), 0.0, 0.0, 0).unwrap();
    tree.update(0);

    assert_eq!(tree.retain(child), Some(2));
    tree.remove_widget(child);
    tree.update(0);

    assert!(tree.contains(child));
    assert_eq!(tree.ref_count(child), Some(1));
    assert_eq!(tree.parent(child), None);
    assert!(tree.children(root).is_empty());

    assert_eq!(tree.release(child), ReleaseOutcome::Freed);
    assert!(!tree.contains(child));
    assert_eq!(tree.release(child), ReleaseOutcome::Stale);
}

#[test]
fn test_release_to_zero_frees_and_parent_drops_handle() {
    let mut tree = setup();
    let root = tree.root();
    let child = tree.add_widget(root, square(10.0), 0.0, 0.0, 0).unwrap();
    tree.update(0);

    assert_eq!(tree.retain(child), Some(2));
    assert_eq!(tree.release(child), ReleaseOutcome::Retained(1));
    assert_eq!(tree.release(child), ReleaseOutcome::Freed);
    assert!(!tree.contains(child));

    tree.sync();
    assert!(tree.children(root).is_empty());
}

#[test]
fn test_removing_panel_frees_subtree() {
    let mut tree = setup();
    let root = tree.root();
    let menu = tree.add_widget(root, square(100.0), 0.0, 0.0, 0).unwrap();
    let item = tree.add_widget(menu, square(10.0), 0.0, 0.0, 0).unwrap();
    tree.update(0);
    assert_eq!(tree.len(), 3);

    tree.remove_widget(menu);
    tree.update(0);
    assert!(!tree.contains(menu));
    assert!(!tree.contains(item));
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_root_is_protected() {
    let mut tree = setup();
    let root = tree.root();
    assert!(!tree.remove_widget(root));
    assert_eq!(tree.release(root), ReleaseOutcome::Retained(1));
    tree.update(0);
    assert!(tree.is_live(root));
}

#[test]
fn test_add_to_stale_parent_is_rejected() {
    let mut tree = setup();
    let root = tree.root();
    let gone = tree.add_widget(root, square(10.0), 0.0, 0.0, 0).unwrap();
    tree.remove_widget(gone);
    tree.update(0);

    assert_eq!(tree.add_widget(gone, square(5.0), 0.0, 0.0, 0), None);
}

#[test]
fn test_find_by_path_sees_staged_children() {
    let mut tree = setup();
    let root = tree.root();
    let menu = tree
        .add_widget(root, Widget::panel().named("menu"), 0.0, 0.0, 0)
        .unwrap();
    let ok = tree
        .add_widget(menu, Widget::panel().named("ok"), 0.0, 0.0, 0)
        .unwrap();

    assert_eq!(tree.find_by_path("menu/ok"), Some(ok));
    assert_eq!(tree.find_by_path("menu"), Some(menu));
    assert_eq!(tree.find_by_path("menu/cancel"), None);
}

#[test]
fn test_proxy_ops_apply_at_sync() {
    let mut tree = setup();
    let root = tree.root();
    let proxy = tree.proxy();

    std::thread::spawn(move || {
        proxy.post(move |tree| {
            tree.add_widget(root, Widget::panel().named("late"), 0.0, 0.0, 0);
        });
    })
    .join()
    .unwrap();

    assert!(tree.children(root).is_empty());
    tree.sync();
    assert_eq!(tree.children(root).len(), 1);
    assert!(tree.find_by_path("late").is_some());
}

#[test]
fn test_dynamic_size_follows_visible_children() {
    let mut tree = setup();
    let root = tree.root();
    let panel = tree
        .add_widget(
            root,
            Widget::panel().with_panel(|p| p.set_padding(10.0, 6.0)),
            0.0,
            0.0,
            0,
        )
        .unwrap();
    tree.add_widget(panel, Widget::panel().sized(50.0, 20.0), 0.0, 0.0, 0)
        .unwrap();
    let far = tree
        .add_widget(panel, Widget::panel().sized(40.0, 10.0), 30.0, 40.0, 0)
        .unwrap();
    tree.update(0);
    assert_eq!(tree.base(panel).unwrap().size(), Size::new(80.0, 56.0));

    tree.base_mut(far).unwrap().is_visible = false;
    tree.update(0);
    assert_eq!(tree.base(panel).unwrap().size(), Size::new(60.0, 26.0));
}

#[test]
fn test_fixed_size_ignores_children() {
    let mut tree = setup();
    let root = tree.root();
    let panel = tree.add_widget(root, square(100.0), 0.0, 0.0, 0).unwrap();
    tree.add_widget(panel, square(300.0), 0.0, 0.0, 0).unwrap();
    tree.update(0);
    assert_eq!(tree.base(panel).unwrap().size(), Size::new(100.0, 100.0));
}

#[test]
fn test_parent_updates_before_children() {
    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl lucent_ui::WidgetHooks for Recorder {
        fn update(&mut self, _parts: &mut lucent_ui::Parts<'_>, _ctx: &mut lucent_ui::UpdateCtx<'_>) {
            self.log.lock().push(self.name);
        }
    }

    let log = Arc::new(Mutex::new(Vec::new()));
    let recorder = |name| Recorder {
        name,
        log: log.clone(),
    };

    let mut tree = setup();
    let root = tree.root();
    let outer = tree
        .add_widget(root, Widget::custom_panel(recorder("outer")), 0.0, 0.0, 0)
        .unwrap();
    tree.add_widget(outer, Widget::custom(recorder("inner")), 0.0, 0.0, 0)
        .unwrap();
    tree.update(0);

    assert_eq!(*log.lock(), vec!["outer", "inner"]);
}

#[test]
fn test_leaf_cannot_hold_children() {
    struct Inert;
    impl lucent_ui::WidgetHooks for Inert {}

    let mut tree = setup();
    let root = tree.root();
    let leaf: WidgetHandle = tree.add_widget(root, Widget::custom(Inert), 0.0, 0.0, 0).unwrap();
    assert!(tree.custom::<Inert>(leaf).is_some());
    assert_eq!(tree.add_widget(leaf, square(5.0), 0.0, 0.0, 0), None);
}
