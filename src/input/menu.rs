use ratatui::layout::Rect;

/// What a menu item does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Restart,
    Quit,
}

/// A clickable label. The renderer draws `label` inside `region` and the
/// input side hit-tests against the same `region`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub region: Rect,
    pub action: MenuAction,
}

impl MenuItem {
    /// Half-open hit test: left/top edges inside, right/bottom outside
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let r = self.region;
        column >= r.x
            && (column as u32) < r.x as u32 + r.width as u32
            && row >= r.y
            && (row as u32) < r.y as u32 + r.height as u32
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    items: Vec<MenuItem>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// "Play again" and "Close", centred below the middle of `area`
    pub fn game_over(area: Rect) -> Self {
        let centre_row = area.y + area.height / 2;
        let entries = [
            ("Play again", MenuAction::Restart, 2),
            ("Close", MenuAction::Quit, 4),
        ];

        let items = entries
            .into_iter()
            .map(|(label, action, offset)| {
                let width = (label.len() as u16 + 4).min(area.width);
                let x = area.x + (area.width - width) / 2;
                let y = (centre_row + offset).min(area.bottom().saturating_sub(1));
                MenuItem {
                    label,
                    region: Rect::new(x, y, width, 1),
                    action,
                }
            })
            .collect();

        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Action of the first item under the pointer
    pub fn hit(&self, column: u16, row: u16) -> Option<MenuAction> {
        self.items
            .iter()
            .find(|item| item.contains(column, row))
            .map(|item| item.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_open_region() {
        let item = MenuItem {
            label: "Close",
            region: Rect::new(10, 5, 4, 2),
            action: MenuAction::Quit,
        };

        assert!(item.contains(10, 5));
        assert!(item.contains(13, 6));
        assert!(!item.contains(14, 5));
        assert!(!item.contains(10, 7));
        assert!(!item.contains(9, 5));
    }

    #[test]
    fn test_game_over_layout() {
        let area = Rect::new(0, 0, 42, 22);
        let menu = Menu::game_over(area);

        assert_eq!(menu.items().len(), 2);

        let play = &menu.items()[0];
        assert_eq!(play.label, "Play again");
        assert_eq!(play.region, Rect::new(14, 13, 14, 1));

        let close = &menu.items()[1];
        assert_eq!(close.region, Rect::new(16, 15, 9, 1));
    }

    #[test]
    fn test_hit_testing() {
        let menu = Menu::game_over(Rect::new(0, 0, 42, 22));

        assert_eq!(menu.hit(20, 13), Some(MenuAction::Restart));
        assert_eq!(menu.hit(20, 15), Some(MenuAction::Quit));
        assert_eq!(menu.hit(20, 14), None);
        assert_eq!(menu.hit(0, 0), None);
    }

    #[test]
    fn test_empty_menu_hits_nothing() {
        assert_eq!(Menu::default().hit(3, 3), None);
    }

    #[test]
    fn test_tiny_area_stays_inside() {
        let area = Rect::new(5, 5, 6, 3);
        let menu = Menu::game_over(area);

        for item in menu.items() {
            assert!(item.region.x >= area.x);
            assert!(item.region.right() <= area.right());
            assert!(item.region.y < area.bottom());
        }
    }
}
