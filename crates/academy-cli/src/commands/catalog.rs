//! The `academy catalog` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use academy_core::catalog::chapter_layout;

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let (_, store) = ctx.load()?;

    let mut table = Table::new();
    table.set_header(vec!["Course", "Title", "Chapters", "Content"]);

    for course in store.courses() {
        let chapters = chapter_layout(&course).len();
        let content = if store.has_content(&course.id) {
            "loaded"
        } else {
            "-"
        };
        table.add_row(vec![
            Cell::new(&course.id),
            Cell::new(&course.title),
            Cell::new(chapters),
            Cell::new(content),
        ]);
    }

    println!("{table}");
    Ok(())
}
