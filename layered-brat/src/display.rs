//! Plain-text overlay of a render response, for tests and debugging.
//!
//! ```text
//! The cat sat.
//!     ╰─╯[A] 1_Entity(ANIMAL)
//!         ╰─╯2_Predicate(sit.01)
//!           └─ARG0─>[A]
//! It slept well.
//! ╰╯1_Entity(ANIMAL)
//! ```
//!
//! Each window sentence is followed by one underline per fragment inside it.
//! Arcs are listed under the first fragment of their `Arg1` entity; arc
//! targets that are drawn get `[A]`, `[B]`, ... labels.

use std::collections::HashMap;
use std::fmt::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::{Entity, GetDocumentResponse, Vid};

/// Convert index to label: 0 -> "[A]", 25 -> "[Z]", 26 -> "[AA]", ...
pub fn index_to_label(mut n: usize) -> String {
    let mut result = String::new();
    loop {
        let remainder = n % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    format!("[{}]", result)
}

pub struct ResponseDisplay<'a> {
    response: &'a GetDocumentResponse,
}

impl<'a> ResponseDisplay<'a> {
    pub fn new(response: &'a GetDocumentResponse) -> Self {
        Self { response }
    }

    /// Labels for drawn entities that are arc targets, in entity order.
    fn build_target_labels(&self) -> HashMap<Vid, String> {
        let targets: Vec<Vid> = self
            .response
            .relations
            .iter()
            .filter_map(|relation| relation.argument("Arg2"))
            .collect();

        self.response
            .entities
            .iter()
            .map(|entity| entity.vid)
            .filter(|vid| targets.contains(vid))
            .enumerate()
            .map(|(i, vid)| (vid, index_to_label(i)))
            .collect()
    }

    fn describe(entity: &Entity) -> String {
        if entity.label.is_empty() {
            entity.type_name.clone()
        } else {
            format!("{}({})", entity.type_name, entity.label)
        }
    }
}

impl<'a> fmt::Display for ResponseDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels = self.build_target_labels();
        let text = self.response.text.as_str();

        for (line_idx, sentence) in self.response.sentence_offsets.iter().enumerate() {
            if line_idx > 0 {
                f.write_char('\n')?;
            }
            let line = text.get(sentence.begin..sentence.end).unwrap_or("");
            f.write_str(line.trim_end())?;

            for entity in &self.response.entities {
                let inside = entity
                    .offsets
                    .iter()
                    .enumerate()
                    .filter(|(_, o)| sentence.begin <= o.begin && o.end <= sentence.end);

                for (fragment_idx, offsets) in inside {
                    let width_to = |offset: usize| {
                        text.get(sentence.begin..offset)
                            .map(UnicodeWidthStr::width)
                            .unwrap_or(0)
                    };
                    let start_char_idx = width_to(offsets.begin);
                    let end_char_idx = width_to(offsets.end);

                    f.write_char('\n')?;
                    for _ in 0..start_char_idx {
                        f.write_char(' ')?;
                    }
                    f.write_char('╰')?;
                    for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                        f.write_char('─')?;
                    }
                    if end_char_idx.saturating_sub(start_char_idx) > 1 {
                        f.write_char('╯')?;
                    }
                    if let Some(label) = labels.get(&entity.vid) {
                        write!(f, "{} ", label)?;
                    }
                    f.write_str(&Self::describe(entity))?;

                    if fragment_idx > 0 {
                        continue;
                    }
                    let outgoing = self
                        .response
                        .relations
                        .iter()
                        .filter(|relation| relation.argument("Arg1") == Some(entity.vid));
                    for relation in outgoing {
                        f.write_char('\n')?;
                        for _ in 0..start_char_idx + 2 {
                            f.write_char(' ')?;
                        }
                        let target = match relation.argument("Arg2") {
                            Some(vid) => labels
                                .get(&vid)
                                .cloned()
                                .unwrap_or_else(|| format!("[{}]", vid)),
                            None => "[?]".to_string(),
                        };
                        write!(f, "└─{}─>{}", relation.label, target)?;
                    }
                }
            }
        }

        Ok(())
    }
}
