use crate::*;

use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use virtual_scroll::{Align, Container, Renderer, ScrollMargins, VirtualScrollOptions};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        start + (self.next_u64() % (end_exclusive - start))
    }
}

/// Records everything the controller asks of its host.
#[derive(Debug, Default)]
struct FakeHost {
    scroll_top: u64,
    viewport_height: u32,
    listening: bool,
    listen_calls: Vec<bool>,
    frames: FrameScheduler,
    write_requests: usize,
    children: Vec<String>,
    offsets: Vec<u64>,
    hidden: Vec<bool>,
    extent: u64,
}

impl ScrollSource for FakeHost {
    fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    fn viewport_height(&self) -> u32 {
        self.viewport_height
    }
}

impl ListenerControl for FakeHost {
    fn set_scroll_listening(&mut self, listening: bool) {
        self.listening = listening;
        self.listen_calls.push(listening);
    }
}

impl WriteScheduler for FakeHost {
    fn request_write_phase(&mut self) {
        self.write_requests += 1;
        self.frames.request_write_phase();
    }
}

impl Container for FakeHost {
    type Element = String;

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut String> {
        self.children.get_mut(index)
    }

    fn append_child(&mut self, element: String) {
        self.children.push(element);
        self.offsets.push(0);
        self.hidden.push(false);
    }

    fn replace_child(&mut self, index: usize, element: String) {
        self.children[index] = element;
    }

    fn set_child_offset(&mut self, index: usize, top: u64) {
        self.offsets[index] = top;
        self.hidden[index] = false;
    }

    fn hide_child(&mut self, index: usize) {
        self.hidden[index] = true;
    }

    fn set_extent(&mut self, extent: u64) {
        self.extent = extent;
    }
}

fn host(viewport_height: u32) -> FakeHost {
    FakeHost {
        viewport_height,
        ..FakeHost::default()
    }
}

/// Ten items of 20px, no margins.
fn controller() -> Controller<u32, FakeHost> {
    Controller::new(
        VirtualScrollOptions::new((0..10).collect::<Vec<u32>>(), |_, _| 20)
            .with_margins(ScrollMargins::tight()),
    )
}

/// Item elements show the item value.
fn label_items(c: &mut Controller<u32, FakeHost>) {
    c.set_item_render(|existing, value, _, _| {
        let label = value.item().map(|v| format!("{v}")).unwrap_or_default();
        match existing {
            Some(e) => {
                *e = label;
                None
            }
            None => Some(label),
        }
    });
}

fn enabled() -> Controller<u32, FakeHost> {
    let mut c = controller();
    c.mount(Some(host(50)));
    label_items(&mut c);
    assert!(c.is_enabled());
    c
}

fn children(c: &Controller<u32, FakeHost>) -> Vec<&str> {
    c.host().unwrap().children.iter().map(String::as_str).collect()
}

/// Every child shows its descriptor's item at its offset; children of off-screen descriptors
/// are hidden.
fn assert_host_follows_pool(c: &Controller<u32, FakeHost>, items: &[u32]) {
    let engine = c.engine();
    let h = c.host().unwrap();
    assert_eq!(h.children.len(), engine.pool_len());
    for (i, node) in engine.nodes().iter().enumerate() {
        let Some(top) = node.top else {
            assert!(h.hidden[i], "child {i} left in view after retirement");
            continue;
        };
        let cell = &engine.cells()[node.cell.index];
        assert!(!h.hidden[i]);
        assert_eq!(h.children[i], format!("{}", items[cell.source_index]));
        assert_eq!(h.offsets[i], top);
    }
}

#[test]
fn mount_without_host_stays_disabled() {
    let mut c = controller();
    label_items(&mut c);
    c.mount(None);
    assert!(!c.is_enabled());
    assert!(c.host().is_none());
    assert!(!c.write_phase());
}

#[test]
fn enables_once_host_items_renderer_and_viewport_are_present() {
    let mut c = controller();
    c.mount(Some(host(50)));
    assert!(!c.is_enabled());
    assert_eq!(c.viewport_height(), 50);
    assert!(c.host().unwrap().listen_calls.is_empty());

    label_items(&mut c);
    assert!(c.is_enabled());
    let h = c.host().unwrap();
    assert!(h.listening);
    assert_eq!(h.listen_calls, [true]);
    // Entering the enabled state runs one pass immediately.
    assert!(c.is_write_pending());
    assert_eq!(h.write_requests, 1);
    assert!(h.frames.is_requested());

    assert!(c.host_mut().unwrap().frames.take_requested());
    assert!(c.write_phase());
    assert!(!c.is_write_pending());
    assert!(!c.write_phase());

    let h = c.host().unwrap();
    assert_eq!(children(&c), ["0", "1", "2"]);
    assert_eq!(h.offsets, [0, 20, 40]);
    assert_eq!(h.extent, 200);
}

#[test]
fn scroll_is_ignored_while_disabled() {
    let mut c = controller();
    c.mount(Some(host(50)));
    c.host_mut().unwrap().scroll_top = 100;
    c.on_scroll();
    assert!(!c.is_write_pending());
    assert_eq!(c.host().unwrap().write_requests, 0);
}

#[test]
fn scroll_while_pending_is_coalesced() {
    let mut c = enabled();
    c.host_mut().unwrap().scroll_top = 20;
    c.on_scroll();
    c.host_mut().unwrap().scroll_top = 40;
    c.on_scroll();
    assert_eq!(c.host().unwrap().write_requests, 1);

    // The pending batch is written, then the latest offset is picked up.
    assert!(c.write_phase());
    assert_eq!(children(&c), ["0", "1", "2"]);
    assert!(c.is_write_pending());
    assert_eq!(c.host().unwrap().write_requests, 2);

    assert!(c.write_phase());
    assert_eq!(children(&c), ["3", "4", "2"]);
    assert_eq!(c.host().unwrap().offsets, [60, 80, 40]);
    assert!(!c.is_write_pending());
}

#[test]
fn scroll_within_the_same_range_requests_nothing() {
    let mut c = enabled();
    c.write_phase();
    c.host_mut().unwrap().scroll_top = 5;
    c.on_scroll();
    assert!(!c.is_write_pending());
    assert_eq!(c.host().unwrap().write_requests, 1);
}

#[test]
fn resize_to_zero_disables() {
    let mut c = enabled();
    c.host_mut().unwrap().viewport_height = 0;
    c.on_resize();
    assert!(!c.is_enabled());
    assert!(!c.host().unwrap().listening);
    assert_eq!(c.host().unwrap().listen_calls, [true, false]);

    // The batch requested before the resize still runs.
    assert!(c.write_phase());
    assert_eq!(children(&c), ["0", "1", "2"]);

    c.host_mut().unwrap().viewport_height = 100;
    c.on_resize();
    assert!(c.is_enabled());
    assert_eq!(c.viewport_height(), 100);
    assert_eq!(c.host().unwrap().listen_calls, [true, false, true]);
    assert!(c.write_phase());
    assert_eq!(children(&c), ["0", "1", "2", "3", "4", "5"]);
}

#[test]
fn clearing_items_or_renderer_disables() {
    let mut c = enabled();
    c.write_phase();
    c.set_items(None);
    assert!(!c.is_enabled());
    assert!(!c.host().unwrap().listening);

    let mut c = enabled();
    c.clear_renderer();
    assert!(!c.is_enabled());
    assert!(c.renderer().is_none());
}

#[test]
fn data_change_flushes_pending_batch_then_renders_fresh_pass() {
    let mut c = enabled();
    assert!(c.is_write_pending());

    c.set_items(Some((100..110).collect::<Vec<u32>>().into()));
    // The old batch was written before the cells changed.
    assert_eq!(children(&c), ["0", "1", "2"]);
    assert!(c.is_write_pending());
    assert_eq!(c.host().unwrap().write_requests, 2);

    assert!(c.write_phase());
    assert_eq!(children(&c), ["100", "101", "102"]);
}

#[test]
fn keyed_items_keep_their_elements() {
    let mut c = enabled();
    c.set_item_key(Some(|v: &u32, _: usize| *v as u64));
    c.write_phase();

    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in = Arc::clone(&calls);
    c.set_item_render(move |existing, value, _, _| {
        calls_in.fetch_add(1, Ordering::Relaxed);
        let label = value.item().map(|v| format!("{v}")).unwrap_or_default();
        match existing {
            Some(e) => {
                *e = label;
                None
            }
            None => Some(label),
        }
    });

    // Prepend one item: 0 and 1 move down, only the new item is rendered.
    let mut items: Vec<u32> = (0..10).collect();
    items.insert(0, 99);
    c.set_items(Some(items.into()));
    assert!(c.write_phase());
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(children(&c), ["0", "1", "99"]);
    assert_eq!(c.host().unwrap().offsets, [20, 40, 0]);
}

#[test]
fn measured_height_reflows_offsets() {
    let mut c = enabled();
    c.write_phase();
    assert!(!c.update_cell_height(0, 20));
    assert!(c.update_cell_height(0, 50));
    assert!(c.is_write_pending());
    assert!(c.write_phase());

    let h = c.host().unwrap();
    assert_eq!(h.offsets[..2], [0, 50]);
    assert_eq!(h.extent, 9 * 20 + 50);
}

#[test]
fn header_fn_adds_section_cells() {
    let mut c = enabled();
    c.set_header_fn(Some(|_: &u32, i: usize, _: &[u32]| {
        (i == 0).then(|| String::from("head"))
    }));
    c.set_header_height(30);
    assert_eq!(c.engine().cells().len(), 11);
    assert_eq!(c.position_for_item(0), Some(30));
    assert!(c.write_phase());
    // The header needed a new element; the descriptor for item 2 is off-screen.
    assert_eq!(children(&c), ["0", "1", "2", ""]);
    assert_eq!(c.host().unwrap().offsets, [30, 50, 40, 0]);
    assert_eq!(c.host().unwrap().hidden, [false, false, true, false]);
}

#[test]
fn shrinking_items_hides_rows_that_fell_out() {
    let mut c = enabled();
    assert!(c.write_phase());

    c.set_items(Some(vec![7u32].into()));
    assert!(c.write_phase());
    let h = c.host().unwrap();
    assert_eq!(children(&c)[0], "7");
    assert_eq!(h.hidden, [false, true, true]);
    assert_eq!(h.extent, 20);
    assert_host_follows_pool(&c, &[7]);

    c.set_items(Some(Arc::from(Vec::<u32>::new())));
    assert!(c.is_enabled());
    assert!(c.write_phase());
    let h = c.host().unwrap();
    assert_eq!(h.hidden, [true, true, true]);
    assert_eq!(h.extent, 0);
}

#[test]
fn bulk_renderer_receives_each_pass() {
    let mut c = controller();
    c.mount(Some(host(50)));
    let seen = Arc::new(AtomicUsize::new(0));
    let seen_in = Arc::clone(&seen);
    c.set_bulk_render(move |frame| {
        let visible = frame.nodes.iter().filter(|n| n.is_visible()).count();
        seen_in.fetch_add(visible, Ordering::Relaxed);
    });
    assert!(c.is_enabled());
    assert!(matches!(c.renderer(), Some(Renderer::Bulk(_))));

    assert!(c.write_phase());
    assert_eq!(seen.load(Ordering::Relaxed), 3);
    let h = c.host().unwrap();
    assert!(h.children.is_empty());
    assert_eq!(h.extent, 200);

    label_items(&mut c);
    assert!(matches!(c.renderer(), Some(Renderer::Item(_))));
}

#[test]
fn unmount_detaches_and_returns_host() {
    let mut c = enabled();
    let h = c.unmount().unwrap();
    assert!(!h.listening);
    assert!(!c.is_enabled());
    assert!(!c.is_write_pending());
    assert!(!c.write_phase());
    assert!(c.unmount().is_none());

    // Remounting a fresh container starts from an empty pool.
    c.mount(Some(host(50)));
    assert!(c.is_enabled());
    assert!(c.write_phase());
    assert_eq!(children(&c), ["0", "1", "2"]);
}

#[test]
fn scroll_to_item_uses_host_geometry() {
    let mut c = enabled();
    assert_eq!(c.position_for_item(3), Some(60));
    assert_eq!(c.scroll_to_item_offset(9, Align::End), Some(150));
    c.host_mut().unwrap().scroll_top = 100;
    assert_eq!(c.scroll_to_item_offset(1, Align::Auto), Some(20));
    assert_eq!(c.scroll_to_item_offset(10, Align::Start), None);
}

#[test]
fn state_snapshot_tracks_lifecycle() {
    let mut c = controller();
    assert_eq!(c.state(), ControllerState::default());
    c.mount(Some(host(50)));
    label_items(&mut c);
    let state = c.state();
    assert!(state.enabled && state.write_pending);
    assert_eq!(state.viewport_height, 50);
    assert_eq!(state.render.pool_len, 3);
}

#[test]
fn frame_scheduler_holds_a_single_request() {
    let mut s = FrameScheduler::new();
    assert!(!s.is_requested());
    assert!(s.request());
    assert!(!s.request());
    assert!(s.take_requested());
    assert!(!s.take_requested());
}

#[test]
fn random_events_leave_container_in_sync() {
    let mut rng = Lcg::new(0xfeed);
    let mut items: Vec<u32> = (0..400).collect();
    let mut c: Controller<u32, FakeHost> = Controller::new(
        VirtualScrollOptions::new(items.clone(), |v: &u32, _| 10 + v % 30)
            .with_margins(ScrollMargins::default()),
    );
    c.mount(Some(host(120)));
    label_items(&mut c);

    for _ in 0..600 {
        match rng.gen_range_u64(0, 11) {
            0..=5 => {
                let total = {
                    c.engine_mut().height_index();
                    c.engine().total_height()
                };
                c.host_mut().unwrap().scroll_top = rng.gen_range_u64(0, total + 100);
                c.on_scroll();
            }
            6 => {
                c.host_mut().unwrap().viewport_height = rng.gen_range_u64(20, 400) as u32;
                c.on_resize();
            }
            7 => {
                // Shrink or grow the list, sometimes to nothing.
                let len = rng.gen_range_u64(0, 400) as u32;
                let base = rng.gen_range_u64(0, 1000) as u32;
                items = (base..base + len).collect();
                c.set_items(Some(items.clone().into()));
            }
            _ => {
                c.write_phase();
            }
        }
        assert!(c.is_enabled());
        if !c.is_write_pending() {
            assert_host_follows_pool(&c, &items);
        }
    }
    while c.write_phase() {}
    assert_host_follows_pool(&c, &items);
}
