//! Terminal color palette row

use super::{Context, Provider};
use crate::render::RenderItem;
use crate::term::Seq;

/// A row of the eight terminal background colors
pub struct PaletteRow;

impl Provider for PaletteRow {
    fn labels(&self) -> Vec<&str> {
        Vec::new()
    }

    fn produce(&self, ctx: &Context) -> Vec<RenderItem> {
        if !ctx.emitter.colors_enabled() {
            return Vec::new();
        }
        let mut row = String::new();
        for digit in 0..8u8 {
            row.push_str(&ctx.emitter.sequence(Seq::Bg(digit)));
            row.push_str("   ");
        }
        row.push_str(&ctx.emitter.sequence(Seq::Reset));
        vec![RenderItem::Raw(row)]
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::Fixture;
    use super::*;
    use crate::config::Settings;
    use crate::term::{Emitter, Palette};

    #[test]
    fn test_row_covers_all_eight_colors() {
        let emitter = Emitter::for_terminal("xterm", Some(true), true);
        let palette = Palette::resolve(&emitter, &Default::default());
        let settings = Settings::default();
        let ctx = Context {
            os_release: None,
            uname: None,
            emitter: &emitter,
            palette: &palette,
            settings: &settings,
        };
        let items = PaletteRow.produce(&ctx);
        assert_eq!(items.len(), 1);
        match &items[0] {
            RenderItem::Raw(row) => {
                for digit in 0..8 {
                    assert!(row.contains(&format!("\x1b[4{}m", digit)));
                }
                assert!(row.ends_with("\x1b[0m"));
            }
            other => panic!("unexpected item: {:?}", other),
        }
    }

    #[test]
    fn test_no_row_without_color() {
        let fixture = Fixture::plain();
        assert!(PaletteRow.produce(&fixture.context()).is_empty());
    }
}
