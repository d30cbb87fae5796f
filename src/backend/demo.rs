//! Generated boards for `--demo` runs and benchmarks.
//!
//! Output depends only on the seed, so a demo board looks the same on every
//! run with the same seed.

use crate::model::{MessageId, MessageRecord, ThreadId, ThreadRecord};
use chrono::{DateTime, Utc};

const WORDS: &[&str] = &[
    "ad", "adipisicing", "aliqua", "aliquip", "amet", "anim", "aute", "cillum", "commodo",
    "consectetur", "consequat", "culpa", "cupidatat", "deserunt", "do", "dolor", "dolore", "duis",
    "ea", "eiusmod", "elit", "enim", "esse", "est", "et", "eu", "ex", "excepteur",
    "exercitation", "fugiat", "id", "in", "incididunt", "ipsum", "irure", "labore", "laboris",
    "laborum", "lorem", "magna", "minim", "mollit", "nisi", "non", "nostrud", "nulla",
    "occaecat", "officia", "pariatur", "proident", "qui", "quis", "reprehenderit", "sint", "sit",
    "sunt", "tempor", "ullamco", "ut", "velit", "veniam", "voluptate",
];

const AUTHORS: &[&str] = &["marta", "jonas", "ines", "pablo", "lucia"];

/// Shape of a generated board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoShape {
    /// Thread count range `[min, max)`.
    pub threads: (usize, usize),
    /// Replies per thread range `[min, max)`.
    pub replies: (usize, usize),
    /// Words per message range `[min, max)`.
    pub words: (usize, usize),
}

impl Default for DemoShape {
    fn default() -> Self {
        Self {
            threads: (80, 150),
            replies: (0, 5),
            words: (20, 300),
        }
    }
}

/// Small deterministic generator (xorshift64*).
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next(&mut self) -> u64 {
        self.0 ^= self.0 >> 12;
        self.0 ^= self.0 << 25;
        self.0 ^= self.0 >> 27;
        self.0.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Value in `[min, max)`; `min` when the range is empty.
    fn range(&mut self, (min, max): (usize, usize)) -> usize {
        if max <= min {
            return min;
        }
        min + (self.next() % (max - min) as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.range((0, items.len()))]
    }
}

fn sentence(rng: &mut Rng, words: (usize, usize)) -> String {
    let count = rng.range(words).max(1);
    let mut text = (0..count)
        .map(|_| rng.pick(WORDS))
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(first) = text.get(..1) {
        text.replace_range(..1, &first.to_uppercase());
    }
    text
}

/// Timestamp between 2016-01-01 and 2021-01-01.
fn stamp(rng: &mut Rng) -> DateTime<Utc> {
    const FROM: i64 = 1_451_606_400;
    const TO: i64 = 1_609_459_200;
    let secs = FROM + (rng.next() % (TO - FROM) as u64) as i64;
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Generate a board with the default shape.
pub fn generate(seed: u64) -> Vec<ThreadRecord> {
    generate_with(seed, DemoShape::default())
}

/// Generate a board of the given shape.
///
/// Replies are stamped after their opening message, in order.
pub fn generate_with(seed: u64, shape: DemoShape) -> Vec<ThreadRecord> {
    let mut rng = Rng::new(seed);
    let mut next_message = 1u64;
    let thread_count = rng.range(shape.threads);

    (1..=thread_count)
        .filter_map(|n| {
            let id = ThreadId::new(format!("t{n}")).ok()?;
            let title = sentence(&mut rng, (3, 8));
            let replies = rng.range(shape.replies);
            let mut when = stamp(&mut rng);

            let messages = (0..=replies)
                .map(|_| {
                    let message = MessageRecord {
                        id: MessageId::new(next_message),
                        thread_id: id.clone(),
                        author: rng.pick(AUTHORS).to_string(),
                        stamp: when,
                        text: sentence(&mut rng, shape.words),
                    };
                    next_message += 1;
                    when += chrono::Duration::minutes(rng.range((5, 3000)) as i64);
                    message
                })
                .collect();

            Some(ThreadRecord {
                id,
                title,
                pinned: n == 1,
                closed: false,
                messages,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_board() {
        assert_eq!(generate(7), generate(7));
        assert_ne!(generate(7), generate(8));
    }

    #[test]
    fn shape_is_respected() {
        let shape = DemoShape {
            threads: (10, 11),
            replies: (2, 3),
            words: (5, 6),
        };
        let threads = generate_with(1, shape);

        assert_eq!(threads.len(), 10);
        for thread in &threads {
            assert_eq!(thread.messages.len(), 3);
            for message in &thread.messages {
                assert_eq!(message.text.split(' ').count(), 5);
                assert_eq!(message.thread_id, thread.id);
            }
        }
    }

    #[test]
    fn message_ids_are_unique_and_replies_follow_opening() {
        let threads = generate(3);
        let mut ids: Vec<_> = threads
            .iter()
            .flat_map(|t| t.messages.iter().map(|m| m.id))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);

        for thread in &threads {
            assert!(thread.messages.windows(2).all(|w| w[0].stamp < w[1].stamp));
        }
    }

    #[test]
    fn text_starts_capitalized() {
        let threads = generate(11);
        let first = threads[0].title.chars().next().unwrap();
        assert!(first.is_uppercase());
    }
}
