use std::time::Duration;

use crate::{
    dto::{input::Action, scene::Scene},
    state::{state_machine::GameEvent, timing::Blink},
};

const CURSOR_BLINK: Duration = Duration::from_millis(150);
const SLOTS: usize = 4;
const LAST_SLOT: usize = SLOTS - 1;

/// A selectable character in the initials grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Letter or symbol written into the initials.
    Letter(char),
    /// Blank slot.
    Space,
    /// Step back to the previous slot.
    Delete,
    /// Accept the initials.
    Checkmark,
}

impl Glyph {
    /// On-screen form; a space is only visible under the cursor.
    fn render(self, under_cursor: bool) -> String {
        match self {
            Glyph::Letter(letter) => letter.to_string(),
            Glyph::Space if under_cursor => "␣".to_string(),
            Glyph::Space => " ".to_string(),
            Glyph::Delete => "⌫".to_string(),
            Glyph::Checkmark => "✓".to_string(),
        }
    }
}

const ALPHABET: [Glyph; 36] = [
    Glyph::Letter('A'),
    Glyph::Letter('B'),
    Glyph::Letter('C'),
    Glyph::Letter('D'),
    Glyph::Letter('E'),
    Glyph::Letter('F'),
    Glyph::Letter('G'),
    Glyph::Letter('H'),
    Glyph::Letter('I'),
    Glyph::Letter('J'),
    Glyph::Letter('K'),
    Glyph::Letter('L'),
    Glyph::Letter('M'),
    Glyph::Letter('N'),
    Glyph::Letter('O'),
    Glyph::Letter('P'),
    Glyph::Letter('Q'),
    Glyph::Letter('R'),
    Glyph::Letter('S'),
    Glyph::Letter('T'),
    Glyph::Letter('U'),
    Glyph::Letter('V'),
    Glyph::Letter('W'),
    Glyph::Letter('X'),
    Glyph::Letter('Y'),
    Glyph::Letter('Z'),
    Glyph::Letter('!'),
    Glyph::Letter('@'),
    Glyph::Letter('#'),
    Glyph::Letter('$'),
    Glyph::Letter('&'),
    Glyph::Letter('*'),
    Glyph::Letter('('),
    Glyph::Letter(')'),
    Glyph::Space,
    Glyph::Delete,
];

/// The fourth slot only confirms or deletes.
const FINAL_CHOICES: [Glyph; 2] = [Glyph::Checkmark, Glyph::Delete];

/// Four-slot arcade initials entry: three characters plus a confirm slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialsEntry {
    /// Index into the slot's choices, `None` while unset.
    slots: [Option<usize>; SLOTS],
    cursor: usize,
}

impl Default for InitialsEntry {
    fn default() -> Self {
        Self {
            slots: [Some(0), None, None, None],
            cursor: 0,
        }
    }
}

impl InitialsEntry {
    fn choices(slot: usize) -> &'static [Glyph] {
        if slot == LAST_SLOT {
            &FINAL_CHOICES
        } else {
            &ALPHABET
        }
    }

    /// Slot being edited.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Glyph chosen in `slot`, `None` before the cursor reaches it.
    pub fn glyph(&self, slot: usize) -> Option<Glyph> {
        self.slots[slot].map(|index| Self::choices(slot)[index])
    }

    /// Select the previous choice for the cursor slot, wrapping.
    pub fn previous(&mut self) {
        let len = Self::choices(self.cursor).len();
        let slot = &mut self.slots[self.cursor];
        *slot = Some(match *slot {
            Some(0) | None => len - 1,
            Some(index) => index - 1,
        });
    }

    /// Select the next choice for the cursor slot, wrapping.
    pub fn next(&mut self) {
        let len = Self::choices(self.cursor).len();
        let slot = &mut self.slots[self.cursor];
        *slot = Some(match *slot {
            None => 0,
            Some(index) => (index + 1) % len,
        });
    }

    /// Act on the glyph under the cursor. Returns the finished initials when
    /// the checkmark is confirmed.
    pub fn enter(&mut self) -> Option<String> {
        match self.glyph(self.cursor) {
            Some(Glyph::Checkmark) => Some(self.initials()),
            Some(Glyph::Delete) => {
                if self.cursor != 0 {
                    self.slots[self.cursor] = None;
                    self.cursor -= 1;
                }
                None
            }
            _ => {
                if self.cursor < LAST_SLOT {
                    self.cursor += 1;
                    self.slots[self.cursor] = Some(0);
                }
                None
            }
        }
    }

    /// Characters of the first three slots; unset slots and spaces read as blanks.
    pub fn initials(&self) -> String {
        (0..LAST_SLOT)
            .filter_map(|slot| match self.glyph(slot) {
                Some(Glyph::Letter(letter)) => Some(letter),
                Some(Glyph::Space) | None => Some(' '),
                Some(Glyph::Delete | Glyph::Checkmark) => None,
            })
            .collect()
    }
}

/// Name capture after a turn.
#[derive(Debug, Clone)]
pub struct EnterInitialsScreen {
    score: u32,
    entry: InitialsEntry,
    cursor_blink: Blink,
}

impl EnterInitialsScreen {
    /// Entry for a turn that scored `score`, cursor on the first slot.
    pub fn new(score: u32) -> Self {
        Self {
            score,
            entry: InitialsEntry::default(),
            cursor_blink: Blink::new(CURSOR_BLINK),
        }
    }

    /// Blink the cursor.
    pub fn update(&mut self, elapsed: Duration) -> Option<GameEvent> {
        self.cursor_blink.advance(elapsed);
        None
    }

    /// Left and right cycle the glyph under the cursor; start enters it.
    pub fn handle(&mut self, action: Action) -> Option<GameEvent> {
        match action {
            Action::MoveLeft => self.entry.previous(),
            Action::MoveRight => self.entry.next(),
            Action::Confirm => return self.entry.enter().map(GameEvent::InitialsEntered),
            _ => {}
        }
        None
    }

    /// Slots rendered for display.
    pub fn draw(&self) -> Scene {
        let cursor = self.entry.cursor();
        let slots = std::array::from_fn(|slot| {
            self.entry
                .glyph(slot)
                .map(|glyph| glyph.render(slot == cursor))
                .unwrap_or_else(|| " ".to_string())
        });
        Scene::EnterInitials {
            score: self.score,
            slots,
            cursor,
            cursor_visible: self.cursor_blink.is_on(),
        }
    }
}
