use std::sync::Arc;

use virtual_scroll::{Container, VirtualScrollOptions};
use virtual_scroll_adapter::{
    Controller, FrameScheduler, ListenerControl, ScrollSource, WriteScheduler,
};

// A terminal-style host: elements are strings, the "frame" is one loop iteration.
#[derive(Default)]
struct Host {
    scroll_top: u64,
    viewport_height: u32,
    listening: bool,
    frames: FrameScheduler,
    lines: Vec<(Option<u64>, String)>,
    extent: u64,
}

impl ScrollSource for Host {
    fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    fn viewport_height(&self) -> u32 {
        self.viewport_height
    }
}

impl ListenerControl for Host {
    fn set_scroll_listening(&mut self, listening: bool) {
        self.listening = listening;
    }
}

impl WriteScheduler for Host {
    fn request_write_phase(&mut self) {
        self.frames.request();
    }
}

impl Container for Host {
    type Element = String;

    fn child_count(&self) -> usize {
        self.lines.len()
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut String> {
        self.lines.get_mut(index).map(|(_, s)| s)
    }

    fn append_child(&mut self, element: String) {
        self.lines.push((None, element));
    }

    fn replace_child(&mut self, index: usize, element: String) {
        self.lines[index].1 = element;
    }

    fn set_child_offset(&mut self, index: usize, top: u64) {
        self.lines[index].0 = Some(top);
    }

    fn hide_child(&mut self, index: usize) {
        self.lines[index].0 = None;
    }

    fn set_extent(&mut self, extent: u64) {
        self.extent = extent;
    }
}

fn main() {
    let items: Arc<[u32]> = (0..10_000).collect::<Vec<_>>().into();
    let mut c: Controller<u32, Host> = Controller::new(
        VirtualScrollOptions::default()
            .with_items(items)
            .with_item_height(|_, _| 18),
    );
    c.set_item_render(|existing, value, _, index| {
        let text = format!("row {index}: {:?}", value.item());
        match existing {
            Some(line) => {
                *line = text;
                None
            }
            None => Some(text),
        }
    });
    c.mount(Some(Host {
        viewport_height: 180,
        ..Host::default()
    }));
    println!("enabled={}", c.is_enabled());

    // Two scroll events per frame: the second one is coalesced into the next batch.
    for frame in 0..5u64 {
        for step in 0..2u64 {
            if let Some(host) = c.host_mut() {
                host.scroll_top = (frame * 2 + step) * 250;
            }
            c.on_scroll();
        }
        let requested = c.host_mut().is_some_and(|h| h.frames.take_requested());
        if requested {
            c.write_phase();
        }
        let Some(host) = c.host() else {
            return;
        };
        println!(
            "frame={frame} scroll_top={} children={} shown={} extent={} state={:?}",
            host.scroll_top,
            host.lines.len(),
            host.lines.iter().filter(|(top, _)| top.is_some()).count(),
            host.extent,
            c.state()
        );
    }
}
