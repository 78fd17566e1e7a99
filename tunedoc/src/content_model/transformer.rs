//! Markdown event stream to block sequence transformation
//!
//! Converts pulldown-cmark's event stream into the ordered block sequence
//! that makes up a guide body. This is a pipeline of elision, not a
//! full-fidelity markdown model: only headings, paragraphs, lists and
//! images produce blocks. Code blocks, rules, raw HTML and other node
//! types are dropped silently, though text inside transparent containers
//! such as block quotes still surfaces as plain paragraphs.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use super::blocks::{Block, ListStyle};
use super::slug::slugify;

/// Parse markdown and transform it into a block sequence.
///
/// # Parameters
/// * `markdown` - Canonical markdown content
///
/// # Returns
/// * `Vec<Block>` - Ordered block sequence; empty input yields an empty
///   sequence, never an error
pub fn blocks_from_markdown(markdown: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::new();

    for event in Parser::new(markdown) {
        builder.process_event(event);
    }

    builder.finish()
}

/// Builder state for converting markdown events to blocks
struct BlockBuilder {
    /// Completed blocks in document order
    blocks: Vec<Block>,

    /// Text accumulator for the current paragraph or heading
    text: String,

    /// Level of the heading currently being built
    heading_level: Option<u8>,

    /// Stack of list contexts (for nested lists)
    list_stack: Vec<ListContext>,

    /// Image currently collecting its alt text
    image: Option<ImageContext>,

    /// Images waiting to be emitted after their enclosing block closes
    pending_images: Vec<Block>,

    /// Inside a code block; its text is dropped
    in_code_block: bool,
}

/// Context for building one list
struct ListContext {
    ordered: bool,
    items: Vec<String>,
    /// Text accumulator for the item currently open, if any
    item: Option<String>,
}

/// Context for an image whose alt text is still streaming in
struct ImageContext {
    url: String,
    title: String,
    alt: String,
}

impl BlockBuilder {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            text: String::new(),
            heading_level: None,
            list_stack: Vec::new(),
            image: None,
            pending_images: Vec::new(),
            in_code_block: false,
        }
    }

    /// Process a single markdown event
    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.handle_start_tag(tag),
            Event::End(tag_end) => self.handle_end_tag(tag_end),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.push_text(&code),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            // Raw HTML, rules, math and footnote markers produce no blocks
            _ => {}
        }
    }

    fn handle_start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.heading_level.is_none() && !self.inside_list_item() {
                    self.text.clear();
                }
            }
            Tag::Heading { level, .. } => {
                self.heading_level = Some(level as u8);
                self.text.clear();
            }
            Tag::List(start) => {
                self.list_stack.push(ListContext {
                    ordered: start.is_some(),
                    items: Vec::new(),
                    item: None,
                });
            }
            Tag::Item => {
                if let Some(ctx) = self.list_stack.last_mut() {
                    ctx.item = Some(String::new());
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(ImageContext {
                    url: dest_url.to_string(),
                    title: title.to_string(),
                    alt: String::new(),
                });
            }
            Tag::CodeBlock(_) => {
                self.in_code_block = true;
            }
            // Block quotes are transparent: their paragraphs surface on
            // their own. Links are transparent too, keeping their text.
            _ => {}
        }
    }

    fn handle_end_tag(&mut self, tag_end: TagEnd) {
        match tag_end {
            TagEnd::Paragraph => self.finish_paragraph(),
            TagEnd::Heading(_) => self.finish_heading(),
            TagEnd::Item => self.finish_list_item(),
            TagEnd::List(_) => self.finish_list(),
            TagEnd::Image => self.finish_image(),
            TagEnd::CodeBlock => {
                self.in_code_block = false;
            }
            _ => {}
        }
    }

    /// Route text to whichever accumulators are currently open
    fn push_text(&mut self, text: &str) {
        if self.in_code_block {
            return;
        }

        // Alt text belongs to the image alone, never the enclosing block
        if let Some(image) = self.image.as_mut() {
            image.alt.push_str(text);
            return;
        }

        // Item text feeds every open item so nested list content also
        // appears in its parent item, matching recursive text extraction
        let mut in_item = false;
        for ctx in self.list_stack.iter_mut() {
            if let Some(item) = ctx.item.as_mut() {
                item.push_str(text);
                in_item = true;
            }
        }

        if self.heading_level.is_some() || !in_item {
            self.text.push_str(text);
        }
    }

    fn inside_list_item(&self) -> bool {
        self.list_stack.iter().any(|ctx| ctx.item.is_some())
    }

    fn finish_heading(&mut self) {
        let Some(level) = self.heading_level.take() else {
            return;
        };

        let content = std::mem::take(&mut self.text);
        let slug = slugify(&content);
        let id = (!slug.is_empty()).then_some(slug);

        self.blocks.push(Block::Heading { level, content, id });
        self.flush_pending_images();
    }

    fn finish_paragraph(&mut self) {
        // Paragraphs inside list items only feed the item text
        if self.inside_list_item() {
            self.flush_pending_images();
            return;
        }

        let content = std::mem::take(&mut self.text);
        let trimmed = content.trim();
        if !trimmed.is_empty() {
            self.blocks.push(Block::Paragraph {
                content: trimmed.to_string(),
            });
        }

        self.flush_pending_images();
    }

    fn finish_list_item(&mut self) {
        let Some(ctx) = self.list_stack.last_mut() else {
            return;
        };
        let Some(item) = ctx.item.take() else {
            return;
        };

        // Items that trim to nothing are dropped
        let trimmed = item.trim();
        if !trimmed.is_empty() {
            ctx.items.push(trimmed.to_string());
        }

        self.flush_pending_images();
    }

    fn finish_list(&mut self) {
        let Some(ctx) = self.list_stack.pop() else {
            return;
        };

        // Never emit a list with no surviving items
        if ctx.items.is_empty() {
            self.flush_pending_images();
            return;
        }

        let style = if ctx.ordered {
            ListStyle::Ordered
        } else {
            ListStyle::Bullet
        };

        self.blocks.push(Block::List {
            style,
            items: ctx.items,
        });
        self.flush_pending_images();
    }

    fn finish_image(&mut self) {
        let Some(ctx) = self.image.take() else {
            return;
        };

        // Absent attributes become unset fields, not empty strings
        let url = (!ctx.url.is_empty()).then_some(ctx.url);
        let caption = (!ctx.title.is_empty()).then_some(ctx.title);
        let alt = {
            let trimmed = ctx.alt.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        self.pending_images.push(Block::Image { url, alt, caption });
    }

    /// Emit collected images once no list is still open, keeping them
    /// after the block they appeared in
    fn flush_pending_images(&mut self) {
        if self.list_stack.is_empty() {
            self.blocks.append(&mut self.pending_images);
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_pending_images();
        self.blocks
    }
}
