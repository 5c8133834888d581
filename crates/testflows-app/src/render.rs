//! Terminal rendering of conversation entries.
//!
//! Assistant replies are markdown; they are parsed with `pulldown-cmark`
//! and flattened into readable plain text. User entries are shown as typed.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use testflows_common::{ConversationEntry, Role};

pub fn render_entry(entry: &ConversationEntry) -> String {
    match entry.role() {
        Role::User => entry
            .content()
            .lines()
            .map(|line| format!("> {line}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Role::Assistant => render_markdown(entry.content()),
    }
}

/// Shown while the conversation is empty.
pub fn empty_state(prompt: &str, session_id: &str) -> String {
    format!("{prompt}\nSession ID: {session_id}")
}

pub fn render_markdown(source: &str) -> String {
    let mut renderer = Renderer::default();
    for event in Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH) {
        renderer.event(event);
    }
    renderer.finish()
}

/// Flattens markdown events into terminal lines.
#[derive(Default)]
struct Renderer {
    lines: Vec<String>,
    line: String,
    /// Open lists, innermost last; ordered lists carry their next number.
    lists: Vec<Option<u64>>,
    /// Open links: target and where the label starts in `line`.
    links: Vec<(String, usize)>,
    code: Option<String>,
}

impl Renderer {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => match self.code.as_mut() {
                Some(code) => code.push_str(&text),
                None => self.line.push_str(&text),
            },
            Event::Code(code) => self.line.push_str(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.line.push_str(html.trim_end()),
            Event::SoftBreak | Event::HardBreak => self.flush(),
            Event::Rule => {
                self.gap();
                self.lines.push("---".into());
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph | Tag::Heading { .. } => self.gap(),
            Tag::CodeBlock(_) => {
                self.flush();
                self.gap();
                self.code = Some(String::new());
            }
            Tag::List(first) => {
                self.flush();
                self.gap();
                self.lists.push(first);
            }
            Tag::Item => {
                self.flush();
                let indent = "  ".repeat(self.lists.len());
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.line = format!("{indent}{marker}");
            }
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.links.push((dest_url.to_string(), self.line.len()));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::Item => self.flush(),
            TagEnd::Heading(level) => {
                let title = std::mem::take(&mut self.line);
                let rule = if level == HeadingLevel::H1 { "=" } else { "-" };
                let width = title.chars().count();
                self.lines.push(title);
                self.lines.push(rule.repeat(width));
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    self.lines.extend(code.lines().map(|line| format!("    {line}")));
                }
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::Link | TagEnd::Image => {
                if let Some((target, label_start)) = self.links.pop() {
                    // Autolinks already show their target.
                    if !target.is_empty() && self.line[label_start..] != *target {
                        self.line.push_str(&format!(" ({target})"));
                    }
                }
            }
            _ => {}
        }
    }

    fn flush(&mut self) {
        if !self.line.is_empty() {
            self.lines.push(std::mem::take(&mut self.line));
        }
    }

    /// Blank line between top-level blocks.
    fn gap(&mut self) {
        if self.lists.is_empty() && self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }

    fn finish(mut self) -> String {
        self.flush();
        while self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
        self.lines.join("\n")
    }
}
