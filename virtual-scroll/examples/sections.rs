// Example: header/footer cells and an item renderer writing into a plain container.
use virtual_scroll::{
    CellValue, Container, Renderer, ScrollMargins, VirtualScroll, VirtualScrollOptions,
};

#[derive(Debug)]
struct Row {
    text: String,
    top: Option<u64>, // None while hidden
}

#[derive(Default)]
struct Rows {
    rows: Vec<Row>,
    extent: u64,
}

impl Container for Rows {
    type Element = Row;

    fn child_count(&self) -> usize {
        self.rows.len()
    }

    fn child_mut(&mut self, index: usize) -> Option<&mut Row> {
        self.rows.get_mut(index)
    }

    fn append_child(&mut self, element: Row) {
        self.rows.push(element);
    }

    fn replace_child(&mut self, index: usize, element: Row) {
        self.rows[index] = element;
    }

    fn set_child_offset(&mut self, index: usize, top: u64) {
        self.rows[index].top = Some(top);
    }

    fn hide_child(&mut self, index: usize) {
        self.rows[index].top = None;
    }

    fn set_extent(&mut self, extent: u64) {
        self.extent = extent;
    }
}

fn main() {
    let names: Vec<&'static str> = vec![
        "alder", "apple", "ash", "beech", "birch", "cedar", "cherry", "elm", "fir", "hazel",
    ];

    let mut v: VirtualScroll<&'static str> = VirtualScroll::new(
        VirtualScrollOptions::new(names, |_, _| 32)
            .with_header_fn(|name, i, all| {
                let first = name.chars().next()?;
                let starts_group = i == 0 || all[i - 1].chars().next() != Some(first);
                starts_group.then(|| first.to_ascii_uppercase().to_string())
            })
            .with_header_height(24)
            .with_margins(ScrollMargins::tight()),
    );

    let renderer = Renderer::<&'static str, String, Row>::item(|existing, value, _, _| {
        let text = match value {
            CellValue::Item(name) => format!("  {name}"),
            CellValue::Header(letter) | CellValue::Footer(letter) => format!("[{letter}]"),
        };
        match existing {
            Some(row) => {
                row.text = text;
                None
            }
            None => Some(Row { text, top: None }),
        }
    });

    let mut rows = Rows::default();
    for scroll_top in [0u64, 90, 200] {
        if v.update(scroll_top, 120) {
            v.render(&mut rows, &renderer);
        }
        println!("scroll_top={scroll_top} range={:?}", v.last_range());
        for row in &rows.rows {
            if let Some(top) = row.top {
                println!("  {top:>4} {}", row.text);
            }
        }
    }
    println!("extent={}", rows.extent);
}
