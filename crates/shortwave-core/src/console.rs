/// Terminal-style reveal for the win message: one character per interval,
/// then the finished line blinks.
#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleText {
    text: String,
    char_interval: f32,
    blink_interval: f32,
    elapsed: f32,
    shown_chars: usize,
    blink_elapsed: f32,
    visible: bool,
}

impl ConsoleText {
    pub fn new(text: &str, char_interval: f32, blink_interval: f32) -> Self {
        Self {
            text: text.to_string(),
            char_interval: char_interval.max(0.0),
            blink_interval: blink_interval.max(f32::EPSILON),
            elapsed: 0.0,
            shown_chars: 0,
            blink_elapsed: 0.0,
            visible: true,
        }
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_typed(&self) -> bool {
        self.shown_chars >= self.char_count()
    }

    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        if !self.is_typed() {
            self.elapsed += dt;
            let total = self.char_count();
            let typed = if self.char_interval <= 0.0 {
                total
            } else {
                // first char appears immediately
                1 + (self.elapsed / self.char_interval) as usize
            };
            self.shown_chars = typed.min(total);
            return;
        }
        self.blink_elapsed += dt;
        while self.blink_elapsed >= self.blink_interval {
            self.blink_elapsed -= self.blink_interval;
            self.visible = !self.visible;
        }
    }

    /// Currently revealed prefix.
    pub fn visible_text(&self) -> &str {
        match self.text.char_indices().nth(self.shown_chars) {
            Some((idx, _)) => &self.text[..idx],
            None => &self.text,
        }
    }

    pub fn alpha(&self) -> f32 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }
}
