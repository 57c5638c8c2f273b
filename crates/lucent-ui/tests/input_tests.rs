//! Pointer and keyboard dispatch through `WidgetTree::process_input`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use lucent_input::KeyCode;
use lucent_test_utils::input::{hold, hover, keys, press, release, wheel};
use lucent_ui::{
    EventKind, InputCtx, MouseState, Parts, Slider, Theme, Toggle, Widget, WidgetEvent,
    WidgetHandle, WidgetHooks, WidgetTree,
};

fn setup() -> WidgetTree {
    let mut tree = WidgetTree::new(Theme::dark());
    tree.set_viewport_size(800.0, 600.0);
    tree
}

fn counter(tree: &mut WidgetTree, handle: WidgetHandle, kind: EventKind) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = count.clone();
    tree.on(handle, kind, move |_| {
        inner.fetch_add(1, Ordering::Relaxed);
    });
    count
}

fn card(tree: &mut WidgetTree, z_level: i32) -> WidgetHandle {
    let root = tree.root();
    tree.add_widget(root, Widget::panel().sized(100.0, 100.0), 10.0, 10.0, z_level)
        .unwrap()
}

#[test]
fn test_click() {
    let mut tree = setup();
    let button = card(&mut tree, 0);
    let clicks = counter(&mut tree, button, EventKind::Click);
    let long_presses = counter(&mut tree, button, EventKind::LongPress);
    tree.update(0);

    tree.process_input(&press(50.0, 50.0, 0));
    assert_eq!(clicks.load(Ordering::Relaxed), 0);
    tree.process_input(&release(50.0, 50.0, 100));
    assert_eq!(clicks.load(Ordering::Relaxed), 1);
    assert_eq!(long_presses.load(Ordering::Relaxed), 0);
}

#[test]
fn test_long_press_replaces_click() {
    let mut tree = setup();
    let button = card(&mut tree, 0);
    let clicks = counter(&mut tree, button, EventKind::Click);
    let long_presses = counter(&mut tree, button, EventKind::LongPress);
    tree.update(0);

    tree.process_input(&press(50.0, 50.0, 0));
    tree.process_input(&hold(50.0, 50.0, 500));
    assert_eq!(long_presses.load(Ordering::Relaxed), 0);
    tree.process_input(&hold(50.0, 50.0, 1000));
    assert_eq!(long_presses.load(Ordering::Relaxed), 1);
    tree.process_input(&hold(50.0, 50.0, 1500));
    tree.process_input(&release(50.0, 50.0, 1600));

    assert_eq!(long_presses.load(Ordering::Relaxed), 1);
    assert_eq!(clicks.load(Ordering::Relaxed), 0);
}

#[test]
fn test_leaving_during_press_cancels_click() {
    let mut tree = setup();
    let button = card(&mut tree, 0);
    let clicks = counter(&mut tree, button, EventKind::Click);
    let exits = counter(&mut tree, button, EventKind::MouseExit);
    tree.update(0);

    tree.process_input(&press(50.0, 50.0, 0));
    tree.process_input(&hold(500.0, 500.0, 20));
    tree.process_input(&hold(50.0, 50.0, 40));
    tree.process_input(&release(50.0, 50.0, 60));

    assert_eq!(exits.load(Ordering::Relaxed), 1);
    assert_eq!(clicks.load(Ordering::Relaxed), 0);
}

#[test]
fn test_only_topmost_sibling_is_entered() {
    let mut tree = setup();
    let under = card(&mut tree, 0);
    let over = card(&mut tree, 1);
    let under_enter = counter(&mut tree, under, EventKind::MouseEnter);
    let over_clicks = counter(&mut tree, over, EventKind::Click);
    let under_clicks = counter(&mut tree, under, EventKind::Click);
    tree.update(0);

    tree.process_input(&press(50.0, 50.0, 0));
    tree.process_input(&release(50.0, 50.0, 50));

    assert_eq!(over_clicks.load(Ordering::Relaxed), 1);
    assert_eq!(under_clicks.load(Ordering::Relaxed), 0);
    assert_eq!(under_enter.load(Ordering::Relaxed), 0);
}

#[test]
fn test_hidden_widget_gets_no_pointer_events() {
    let mut tree = setup();
    let button = card(&mut tree, 0);
    let enters = counter(&mut tree, button, EventKind::MouseEnter);
    tree.update(0);
    tree.base_mut(button).unwrap().is_visible = false;

    tree.process_input(&hover(50.0, 50.0, 0));
    assert_eq!(enters.load(Ordering::Relaxed), 0);

    tree.base_mut(button).unwrap().is_visible = true;
    tree.process_input(&hover(50.0, 50.0, 16));
    assert_eq!(enters.load(Ordering::Relaxed), 1);
}

struct WheelRecorder {
    consume: bool,
    seen: Arc<AtomicU32>,
}

impl WheelRecorder {
    fn new(consume: bool) -> (Self, Arc<AtomicU32>) {
        let seen = Arc::new(AtomicU32::new(0));
        (
            Self {
                consume,
                seen: seen.clone(),
            },
            seen,
        )
    }
}

impl WidgetHooks for WheelRecorder {
    fn mouse(&mut self, _parts: &mut Parts<'_>, state: &MouseState, _ctx: &mut InputCtx<'_>) -> bool {
        self.seen.fetch_add(state.wheel_up, Ordering::Relaxed);
        self.consume && state.has_wheel()
    }
}

#[test]
fn test_wheel_consumed_by_child_is_hidden_from_parent() {
    let mut tree = setup();
    let root = tree.root();
    let (outer, outer_seen) = WheelRecorder::new(false);
    let (inner, inner_seen) = WheelRecorder::new(true);
    let list = tree
        .add_widget(root, Widget::custom_panel(outer).sized(200.0, 200.0), 0.0, 0.0, 0)
        .unwrap();
    tree.add_widget(list, Widget::custom_panel(inner).sized(50.0, 50.0), 0.0, 0.0, 0)
        .unwrap();
    tree.update(0);

    tree.process_input(&wheel(10.0, 10.0, 2, 0));
    assert_eq!(inner_seen.load(Ordering::Relaxed), 2);
    assert_eq!(outer_seen.load(Ordering::Relaxed), 0);
}

#[test]
fn test_unconsumed_wheel_reaches_parent() {
    let mut tree = setup();
    let root = tree.root();
    let (outer, outer_seen) = WheelRecorder::new(false);
    let (inner, inner_seen) = WheelRecorder::new(false);
    let list = tree
        .add_widget(root, Widget::custom_panel(outer).sized(200.0, 200.0), 0.0, 0.0, 0)
        .unwrap();
    tree.add_widget(list, Widget::custom_panel(inner).sized(50.0, 50.0), 0.0, 0.0, 0)
        .unwrap();
    tree.update(0);

    tree.process_input(&wheel(10.0, 10.0, 3, 0));
    assert_eq!(inner_seen.load(Ordering::Relaxed), 3);
    assert_eq!(outer_seen.load(Ordering::Relaxed), 3);
}

#[test]
fn test_press_focuses_and_keys_bubble() {
    let mut tree = setup();
    let root = tree.root();
    let form = tree
        .add_widget(root, Widget::panel().sized(300.0, 100.0), 0.0, 0.0, 0)
        .unwrap();
    let slider = tree.add_widget(form, Slider::new(100.0), 10.0, 10.0, 0).unwrap();
    let focused = counter(&mut tree, slider, EventKind::FocusGained);
    let form_keys = counter(&mut tree, form, EventKind::KeyPressed);
    tree.update(0);

    tree.process_input(&press(20.0, 15.0, 0));
    assert_eq!(tree.keyboard_focus(), Some(slider));
    assert_eq!(focused.load(Ordering::Relaxed), 1);
    let start = tree.get::<Slider>(slider).unwrap().value();
    assert!((start - 0.1).abs() < 1e-5);

    tree.process_input(&keys(&[KeyCode::Right], 16));
    let value = tree.get::<Slider>(slider).unwrap().value();
    assert!((value - 0.15).abs() < 1e-5);
    assert_eq!(form_keys.load(Ordering::Relaxed), 0);

    tree.process_input(&keys(&[KeyCode::Character('x')], 32));
    assert_eq!(form_keys.load(Ordering::Relaxed), 1);
}

#[test]
fn test_focus_moves_between_widgets() {
    let mut tree = setup();
    let root = tree.root();
    let first = tree.add_widget(root, Slider::new(100.0), 0.0, 0.0, 0).unwrap();
    let second = tree.add_widget(root, Slider::new(100.0), 0.0, 100.0, 0).unwrap();
    let lost = counter(&mut tree, first, EventKind::FocusLost);
    tree.update(0);

    assert!(tree.set_keyboard_focus(Some(first)));
    tree.process_input(&press(5.0, 105.0, 0));
    assert_eq!(tree.keyboard_focus(), Some(second));
    assert_eq!(lost.load(Ordering::Relaxed), 1);

    tree.remove_widget(second);
    assert!(!tree.set_keyboard_focus(Some(second)));
    tree.update(0);
    assert_eq!(tree.keyboard_focus(), None);
}

#[test]
fn test_slider_wheel_and_end_keys() {
    let mut tree = setup();
    let root = tree.root();
    let slider = tree
        .add_widget(root, Slider::new(100.0).with_step(0.25), 0.0, 0.0, 0)
        .unwrap();
    let changes = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let log = changes.clone();
    tree.on(slider, EventKind::ValueChanged, move |ctx| {
        if let WidgetEvent::ValueChanged(value) = ctx.event {
            log.lock().push(value);
        }
    });
    tree.update(0);

    tree.process_input(&wheel(10.0, 5.0, 2, 0));
    assert_eq!(tree.get::<Slider>(slider).unwrap().value(), 0.5);

    tree.set_keyboard_focus(Some(slider));
    tree.process_input(&keys(&[KeyCode::End, KeyCode::End, KeyCode::Home], 16));
    assert_eq!(*changes.lock(), vec![0.5, 1.0, 0.0]);
}

#[test]
fn test_toggle_flips_on_click_and_key() {
    let mut tree = setup();
    let root = tree.root();
    let toggle = tree.add_widget(root, Toggle::new(false), 0.0, 0.0, 0).unwrap();
    let states = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let log = states.clone();
    tree.on(toggle, EventKind::StateChanged, move |ctx| {
        if let WidgetEvent::StateChanged(on) = ctx.event {
            log.lock().push(on);
        }
    });
    tree.update(0);

    let size = tree.base(toggle).unwrap().size();
    assert_eq!(size.width, size.height * 2.0);

    tree.process_input(&press(5.0, 5.0, 0));
    tree.process_input(&release(5.0, 5.0, 50));
    assert!(tree.get::<Toggle>(toggle).unwrap().is_on());

    tree.update(Theme::dark().timing.short_transition_ms);
    assert_eq!(tree.get::<Toggle>(toggle).unwrap().knob_offset(), size.height);

    tree.process_input(&keys(&[KeyCode::Enter], 100));
    assert!(!tree.get::<Toggle>(toggle).unwrap().is_on());
    assert_eq!(*states.lock(), vec![true, false]);
}

#[test]
fn test_suspended_input_skips_widget() {
    let mut tree = setup();
    let button = card(&mut tree, 0);
    let presses = counter(&mut tree, button, EventKind::MousePress);
    tree.update(0);
    tree.base_mut(button).unwrap().is_input_suspended = true;

    tree.process_input(&press(50.0, 50.0, 0));
    assert_eq!(presses.load(Ordering::Relaxed), 0);
}
