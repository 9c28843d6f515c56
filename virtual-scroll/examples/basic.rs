// Example: minimal usage and scroll-to helper.
use virtual_scroll::{Align, VirtualScroll, VirtualScrollOptions};

fn main() {
    let items: Vec<u64> = (0..1_000_000).collect();
    let mut v: VirtualScroll<u64> = VirtualScroll::new(VirtualScrollOptions::new(items, |_, _| 24));

    let changed = v.update(123_456, 600);
    println!("changed={changed} total_height={}", v.total_height());
    println!("visible_range={:?}", v.last_range());
    println!("pool_len={}", v.pool_len());

    let off = v.scroll_to_item_offset(999_999, Align::End, 123_456, 600);
    println!("scroll_to_item(999_999, End)={off:?}");
}
