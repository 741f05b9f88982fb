//! Staggered card reveals
//!
//! Cards are grouped by a shared class. On first intersection a card waits
//! `data-delay` ms if given, else `index * step_ms`, then becomes visible for
//! good.

/// A group of sibling cards sharing one marker class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardGroup {
    pub selector: &'static str,
    /// Reveal stagger per sibling index
    pub step_ms: u32,
    /// CSS `transition-delay` stagger per sibling index, if the group uses one
    pub transition_step_ms: Option<u32>,
}

impl CardGroup {
    pub const fn new(selector: &'static str, step_ms: u32, transition_step_ms: Option<u32>) -> Self {
        Self {
            selector,
            step_ms,
            transition_step_ms,
        }
    }

    /// Delay between first intersection and reveal
    pub fn reveal_delay(&self, index: usize, explicit: Option<u32>) -> u32 {
        explicit.unwrap_or_else(|| (index as u32).saturating_mul(self.step_ms))
    }

    /// `transition-delay` value for the card at `index`
    pub fn transition_delay_css(&self, index: usize) -> Option<String> {
        self.transition_step_ms
            .map(|step| format!("{}ms", (index as u32).saturating_mul(step)))
    }
}

/// One intersection observer and the groups it serves
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverSpec {
    pub threshold: f64,
    pub root_margin: &'static str,
    pub groups: &'static [CardGroup],
}

/// Hero, gallery and culture cards
const PRIMARY_GROUPS: [CardGroup; 3] = [
    CardGroup::new(".vibe-card", 100, Some(100)),
    CardGroup::new(".gallery-item", 100, None),
    CardGroup::new(".culture-card", 100, Some(150)),
];

/// Themed sections further down the page
const SECTION_GROUPS: [CardGroup; 5] = [
    CardGroup::new(".nature-card", 150, Some(200)),
    CardGroup::new(".sacred-card", 150, Some(180)),
    CardGroup::new(".water-card", 150, Some(150)),
    CardGroup::new(".season-card", 150, Some(220)),
    CardGroup::new(".urban-card", 150, Some(200)),
];

pub const OBSERVERS: [ObserverSpec; 2] = [
    ObserverSpec {
        threshold: 0.1,
        root_margin: "0px 0px -100px 0px",
        groups: &PRIMARY_GROUPS,
    },
    ObserverSpec {
        threshold: 0.15,
        root_margin: "0px 0px -80px 0px",
        groups: &SECTION_GROUPS,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(pub usize);

/// Reveal state; only ever moves forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Hidden,
    Scheduled { delay_ms: u32 },
    Visible,
}

#[derive(Debug, Clone)]
struct Card {
    delay_ms: u32,
    state: CardState,
}

/// Every watched card on the page
#[derive(Debug, Default)]
pub struct RevealBoard {
    cards: Vec<Card>,
}

impl RevealBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch the card at sibling `index` of `group`
    pub fn register(&mut self, group: &CardGroup, index: usize, explicit_delay: Option<u32>) -> CardId {
        let id = CardId(self.cards.len());
        self.cards.push(Card {
            delay_ms: group.reveal_delay(index, explicit_delay),
            state: CardState::Hidden,
        });
        id
    }

    /// Card entered the viewport. Returns the delay to wait before calling
    /// `reveal`, or `None` if the card was already scheduled or visible.
    pub fn on_intersect(&mut self, id: CardId) -> Option<u32> {
        let card = self.cards.get_mut(id.0)?;
        match card.state {
            CardState::Hidden => {
                card.state = CardState::Scheduled {
                    delay_ms: card.delay_ms,
                };
                Some(card.delay_ms)
            }
            CardState::Scheduled { .. } | CardState::Visible => None,
        }
    }

    /// Delay elapsed. True only on the first flip to visible.
    pub fn reveal(&mut self, id: CardId) -> bool {
        match self.cards.get_mut(id.0) {
            Some(card) if card.state != CardState::Visible => {
                card.state = CardState::Visible;
                true
            }
            _ => false,
        }
    }

    pub fn state(&self, id: CardId) -> Option<CardState> {
        self.cards.get(id.0).map(|c| c.state)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.state == CardState::Visible)
            .count()
    }
}

/// Leading integer of a `data-delay` value (`"300"`, `" 300ms"`)
pub fn parse_delay(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_cards_stagger_by_step() {
        let group = CardGroup::new(".vibe-card", 100, Some(100));
        let mut board = RevealBoard::new();
        let ids: Vec<_> = (0..5).map(|i| board.register(&group, i, None)).collect();

        let delays: Vec<_> = ids.iter().map(|&id| board.on_intersect(id)).collect();
        assert_eq!(
            delays,
            vec![Some(0), Some(100), Some(200), Some(300), Some(400)]
        );

        // Timers fire in delay order; each flip is permanent
        for (n, &id) in ids.iter().enumerate() {
            assert!(board.reveal(id));
            assert_eq!(board.visible_count(), n + 1);
        }
    }

    #[test]
    fn test_explicit_delay_wins() {
        let group = CardGroup::new(".nature-card", 150, Some(200));
        let mut board = RevealBoard::new();
        let id = board.register(&group, 3, Some(40));
        assert_eq!(board.on_intersect(id), Some(40));
    }

    #[test]
    fn test_reintersection_is_ignored() {
        let group = CardGroup::new(".gallery-item", 100, None);
        let mut board = RevealBoard::new();
        let id = board.register(&group, 1, None);

        assert_eq!(board.on_intersect(id), Some(100));
        assert_eq!(board.on_intersect(id), None);
        assert!(board.reveal(id));
        assert_eq!(board.on_intersect(id), None);
        assert!(!board.reveal(id));
        assert_eq!(board.state(id), Some(CardState::Visible));
    }

    #[test]
    fn test_unknown_card_is_noop() {
        let mut board = RevealBoard::new();
        assert_eq!(board.on_intersect(CardId(9)), None);
        assert!(!board.reveal(CardId(9)));
        assert!(board.is_empty());
    }

    #[test]
    fn test_groups_keep_their_own_step() {
        let mut board = RevealBoard::new();
        let hero = board.register(&OBSERVERS[0].groups[0], 2, None);
        let nature = board.register(&OBSERVERS[1].groups[0], 2, None);
        assert_eq!(board.on_intersect(hero), Some(200));
        assert_eq!(board.on_intersect(nature), Some(300));
    }

    #[test]
    fn test_transition_delay_css() {
        let season = CardGroup::new(".season-card", 150, Some(220));
        assert_eq!(season.transition_delay_css(0).as_deref(), Some("0ms"));
        assert_eq!(season.transition_delay_css(3).as_deref(), Some("660ms"));
        let gallery = CardGroup::new(".gallery-item", 100, None);
        assert_eq!(gallery.transition_delay_css(3), None);
    }

    #[test]
    fn test_parse_delay() {
        assert_eq!(parse_delay("300"), Some(300));
        assert_eq!(parse_delay(" 1200ms"), Some(1200));
        assert_eq!(parse_delay("0"), Some(0));
        assert_eq!(parse_delay(""), None);
        assert_eq!(parse_delay("soon"), None);
    }
}
