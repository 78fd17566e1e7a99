//! HTML renderer for guides and sections
//!
//! Maps each block variant to its markup and assembles whole-guide and
//! per-section pages with an embedded stylesheet. Block rendering is a
//! pure function of one block plus its ordinal position; a stored block
//! of an unrecognized type renders as nothing so that newer documents
//! degrade instead of erroring.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::content_model::{Block, ListStyle, QuoteStyle, VideoProvider};
use crate::sections::Section;
use crate::view_model::{GuideViewModel, TocItem};

static YOUTUBE_VIDEO_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\s]+)").expect("valid youtube pattern")
});

/// Render the whole-guide reading page
pub fn render_guide_page(view: &GuideViewModel<'_>) -> String {
    let mut output = String::new();

    write_html_header(&mut output, &view.guide.title);
    output.push_str("<body>\n<div class=\"container\">\n");

    write_guide_header(&mut output, view);
    write_toc(&mut output, &view.toc);

    output.push_str("<main class=\"guide-body\">\n");
    for (index, block) in view.guide.blocks.iter().enumerate() {
        output.push_str(&render_block(block, index));
    }
    output.push_str("</main>\n");

    output.push_str("</div>\n</body>\n</html>\n");
    output
}

/// Render a single-section page with prev/next navigation
pub fn render_section_page(
    view: &GuideViewModel<'_>,
    section: &Section<'_>,
    prev: Option<&Section<'_>>,
    next: Option<&Section<'_>>,
) -> String {
    let mut output = String::new();

    write_html_header(&mut output, &section.title);
    output.push_str("<body>\n<div class=\"container\">\n");

    write_guide_header(&mut output, view);

    output.push_str("<main class=\"guide-body\">\n");
    for (index, block) in section.blocks.iter().enumerate() {
        output.push_str(&render_block(block, index));
    }
    output.push_str("</main>\n");

    write_section_nav(&mut output, prev, next);

    output.push_str("</div>\n</body>\n</html>\n");
    output
}

/// Render one block to an HTML fragment.
///
/// `index` is the block's zero-based position in the sequence being
/// rendered; only ad slots surface it. Unknown variants yield an empty
/// string.
pub fn render_block(block: &Block, index: usize) -> String {
    let mut output = String::new();

    match block {
        Block::Heading { level, content, id } => {
            let level = (*level).clamp(1, 6);
            match id.as_deref().filter(|s| !s.is_empty()) {
                Some(id) => output.push_str(&format!(
                    "<h{} id=\"{}\">{}</h{}>\n",
                    level,
                    escape_html(id),
                    escape_html(content),
                    level
                )),
                None => output.push_str(&format!(
                    "<h{}>{}</h{}>\n",
                    level,
                    escape_html(content),
                    level
                )),
            }
        }

        Block::Paragraph { content } => {
            output.push_str(&format!("<p>{}</p>\n", escape_html(content)));
        }

        Block::List { style, items } => {
            let tag = match style {
                ListStyle::Ordered => "ol",
                ListStyle::Bullet => "ul",
            };
            output.push_str(&format!("<{}>\n", tag));
            for item in items {
                output.push_str(&format!("<li>{}</li>\n", escape_html(item)));
            }
            output.push_str(&format!("</{}>\n", tag));
        }

        Block::Image { url, alt, caption } => {
            write_image(&mut output, url.as_deref(), alt.as_deref(), caption.as_deref());
        }

        Block::Quote { content, style } => {
            let style = style.unwrap_or(QuoteStyle::Info);
            output.push_str(&format!(
                "<blockquote class=\"quote-{}\">{}</blockquote>\n",
                style.as_str(),
                escape_html(content)
            ));
        }

        Block::Table { headers, rows } => {
            write_table(&mut output, headers, rows);
        }

        Block::Video { url, provider } => {
            write_video(&mut output, url, *provider);
        }

        Block::Divider => {
            output.push_str("<hr>\n");
        }

        Block::Ad { position } => {
            let label = position.map(|p| p.as_str()).unwrap_or("auto");
            output.push_str(&format!(
                "<aside class=\"ad-slot\"><p>광고 영역 ({}, 블록 #{})</p></aside>\n",
                label,
                index + 1
            ));
        }

        // forward compatibility: newer block types render as nothing
        Block::Unknown => {}
    }

    output
}

/// Write an image figure, or an upload-pending placeholder when the
/// block has no url yet
fn write_image(output: &mut String, url: Option<&str>, alt: Option<&str>, caption: Option<&str>) {
    let Some(url) = url else {
        output.push_str(
            "<div class=\"image-pending\"><p>이미지 업로드 대기 중</p></div>\n",
        );
        return;
    };

    output.push_str("<figure>\n");
    output.push_str(&format!(
        "<img src=\"{}\" alt=\"{}\">\n",
        escape_html(url),
        escape_html(alt.unwrap_or(""))
    ));
    if let Some(caption) = caption {
        output.push_str(&format!("<figcaption>{}</figcaption>\n", escape_html(caption)));
    }
    output.push_str("</figure>\n");
}

/// Write a table, rendering exactly the cells that exist.
///
/// Rows are not padded or truncated to the header width; ragged rows are
/// stored data and must render, not error.
fn write_table(output: &mut String, headers: &[String], rows: &[Vec<String>]) {
    output.push_str("<table>\n<thead>\n<tr>\n");
    for header in headers {
        output.push_str(&format!("<th>{}</th>\n", escape_html(header)));
    }
    output.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        output.push_str("<tr>\n");
        for cell in row {
            output.push_str(&format!("<td>{}</td>\n", escape_html(cell)));
        }
        output.push_str("</tr>\n");
    }

    output.push_str("</tbody>\n</table>\n");
}

fn write_video(output: &mut String, url: &str, provider: Option<VideoProvider>) {
    let embed_url = match provider {
        Some(VideoProvider::Youtube) => youtube_embed_url(url),
        Some(VideoProvider::Vimeo) | Some(VideoProvider::Direct) => Some(url.to_string()),
        None => youtube_embed_url(url).or_else(|| Some(url.to_string())),
    };

    match embed_url {
        Some(embed_url) => {
            output.push_str(&format!(
                "<div class=\"video\"><iframe src=\"{}\" allowfullscreen></iframe></div>\n",
                escape_html(&embed_url)
            ));
        }
        None => {
            output.push_str(
                "<div class=\"video-error\"><p>비디오를 로드할 수 없습니다</p></div>\n",
            );
        }
    }
}

/// Extract a YouTube video id and build its embed URL
fn youtube_embed_url(url: &str) -> Option<String> {
    YOUTUBE_VIDEO_ID
        .captures(url)
        .map(|caps| format!("https://www.youtube.com/embed/{}", &caps[1]))
}

/// Write the HTML head with the embedded stylesheet
fn write_html_header(output: &mut String, title: &str) {
    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"ko\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"UTF-8\">\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str("<style>\n");
    output.push_str(CSS_STYLES);
    output.push_str("</style>\n");
    output.push_str("</head>\n");
}

/// Write the guide header: title, resolved names, read time, summary, tags
fn write_guide_header(output: &mut String, view: &GuideViewModel<'_>) {
    output.push_str("<header class=\"guide-header\">\n");
    output.push_str(&format!(
        "<h1 class=\"guide-title\">{}</h1>\n",
        escape_html(&view.guide.title)
    ));
    output.push_str(&format!(
        "<p class=\"guide-meta\">{} · {} · {}분</p>\n",
        escape_html(&view.level_name),
        escape_html(&view.category_name),
        view.estimated_read_time
    ));

    if let Some(summary) = &view.guide.summary {
        output.push_str(&format!(
            "<p class=\"guide-summary\">{}</p>\n",
            escape_html(summary)
        ));
    }

    if !view.guide.tags.is_empty() {
        output.push_str("<p class=\"guide-tags\">");
        for tag in &view.guide.tags {
            output.push_str(&format!("<span class=\"tag\">{}</span> ", escape_html(tag)));
        }
        output.push_str("</p>\n");
    }

    output.push_str("</header>\n");
}

fn write_toc(output: &mut String, toc: &[TocItem]) {
    if toc.is_empty() {
        return;
    }

    output.push_str("<nav class=\"toc\">\n<ul>\n");
    for item in toc {
        output.push_str(&format!(
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>\n",
            item.level,
            escape_html(&item.id),
            escape_html(&item.title)
        ));
    }
    output.push_str("</ul>\n</nav>\n");
}

/// Write prev/next section links; sibling pages live next to each other
fn write_section_nav(output: &mut String, prev: Option<&Section<'_>>, next: Option<&Section<'_>>) {
    if prev.is_none() && next.is_none() {
        return;
    }

    output.push_str("<nav class=\"section-nav\">\n");
    if let Some(prev) = prev {
        output.push_str(&format!(
            "<a class=\"prev\" href=\"{}.html\">&larr; {}</a>\n",
            escape_html(&prev.id),
            escape_html(&prev.title)
        ));
    }
    if let Some(next) = next {
        output.push_str(&format!(
            "<a class=\"next\" href=\"{}.html\">{} &rarr;</a>\n",
            escape_html(&next.id),
            escape_html(&next.title)
        ));
    }
    output.push_str("</nav>\n");
}

/// Escape text for safe inclusion in HTML content and attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Embedded stylesheet for rendered pages
const CSS_STYLES: &str = r#"
body {
    font-family: -apple-system, "Segoe UI", "Noto Sans KR", sans-serif;
    line-height: 1.7;
    color: #222;
    margin: 0;
}
.container {
    max-width: 760px;
    margin: 0 auto;
    padding: 2rem 1rem;
}
.guide-header { border-bottom: 2px solid #eee; margin-bottom: 1.5rem; }
.guide-title { margin-bottom: 0.25rem; }
.guide-meta { color: #777; font-size: 0.9rem; }
.guide-summary { color: #555; }
.tag {
    background: #f0f0f0;
    border-radius: 4px;
    padding: 0.1rem 0.5rem;
    font-size: 0.85rem;
}
.toc {
    background: #fafafa;
    border: 1px solid #eee;
    border-radius: 6px;
    padding: 0.75rem 1rem;
    margin-bottom: 2rem;
}
.toc ul { list-style: none; margin: 0; padding: 0; }
.toc-level-2 { padding-left: 1rem; }
.toc-level-3 { padding-left: 2rem; }
figure { margin: 1.5rem 0; }
figure img { max-width: 100%; border-radius: 6px; }
figcaption { text-align: center; color: #777; font-size: 0.9rem; }
.image-pending, .video-error {
    background: #f5f5f5;
    border: 2px dashed #ccc;
    border-radius: 6px;
    padding: 2rem;
    text-align: center;
    color: #888;
}
blockquote {
    border-left: 4px solid #8ab4f8;
    margin: 1.5rem 0;
    padding: 0.75rem 1rem;
    border-radius: 0 6px 6px 0;
}
.quote-info { background: #eef4ff; border-color: #8ab4f8; }
.quote-warning { background: #fff8e1; border-color: #f0c040; }
.quote-error { background: #fdecea; border-color: #e57373; }
.quote-success { background: #e8f5e9; border-color: #81c784; }
table { border-collapse: collapse; width: 100%; margin: 1.5rem 0; }
th, td { border: 1px solid #ddd; padding: 0.5rem 0.75rem; text-align: left; }
thead { background: #fafafa; }
.video { aspect-ratio: 16 / 9; margin: 1.5rem 0; }
.video iframe { width: 100%; height: 100%; border: 0; border-radius: 6px; }
.ad-slot {
    background: #f8f8f8;
    border: 1px dashed #ccc;
    border-radius: 6px;
    padding: 1.5rem;
    margin: 2rem 0;
    text-align: center;
    color: #999;
}
.section-nav {
    display: flex;
    justify-content: space-between;
    border-top: 2px solid #eee;
    margin-top: 2rem;
    padding-top: 1rem;
}
.section-nav .next { margin-left: auto; }
hr { border: 0; border-top: 2px solid #eee; margin: 2rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_model::AdPosition;

    #[test]
    fn test_heading_renders_with_anchor() {
        let block = Block::Heading {
            level: 2,
            content: "Wheels".to_string(),
            id: Some("wheels".to_string()),
        };
        assert_eq!(render_block(&block, 0), "<h2 id=\"wheels\">Wheels</h2>\n");
    }

    #[test]
    fn test_heading_level_is_clamped() {
        let block = Block::Heading {
            level: 9,
            content: "x".to_string(),
            id: None,
        };
        assert_eq!(render_block(&block, 0), "<h6>x</h6>\n");
    }

    #[test]
    fn test_paragraph_escapes_content() {
        let block = Block::Paragraph {
            content: "torque > 100Nm & rising".to_string(),
        };
        assert_eq!(
            render_block(&block, 0),
            "<p>torque &gt; 100Nm &amp; rising</p>\n"
        );
    }

    #[test]
    fn test_ordered_and_bullet_lists() {
        let ordered = Block::List {
            style: ListStyle::Ordered,
            items: vec!["one".to_string()],
        };
        assert!(render_block(&ordered, 0).starts_with("<ol>"));

        let bullet = Block::List {
            style: ListStyle::Bullet,
            items: vec!["one".to_string()],
        };
        assert!(render_block(&bullet, 0).starts_with("<ul>"));
    }

    #[test]
    fn test_image_without_url_renders_placeholder() {
        let block = Block::Image {
            url: None,
            alt: None,
            caption: None,
        };
        assert!(render_block(&block, 0).contains("image-pending"));
    }

    #[test]
    fn test_image_with_caption() {
        let block = Block::Image {
            url: Some("https://img.example/wing.jpg".to_string()),
            alt: Some("wing".to_string()),
            caption: Some("carbon fiber".to_string()),
        };
        let html = render_block(&block, 0);
        assert!(html.contains("src=\"https://img.example/wing.jpg\""));
        assert!(html.contains("alt=\"wing\""));
        assert!(html.contains("<figcaption>carbon fiber</figcaption>"));
    }

    #[test]
    fn test_quote_defaults_to_info() {
        let block = Block::Quote {
            content: "check clearance first".to_string(),
            style: None,
        };
        assert!(render_block(&block, 0).contains("quote-info"));
    }

    #[test]
    fn test_ragged_table_renders_existing_cells() {
        let block = Block::Table {
            headers: vec!["part".to_string(), "price".to_string()],
            rows: vec![
                vec!["coilover".to_string()],
                vec!["pads".to_string(), "80".to_string(), "extra".to_string()],
            ],
        };
        let html = render_block(&block, 0);
        assert_eq!(html.matches("<th>").count(), 2);
        assert_eq!(html.matches("<td>").count(), 4);
    }

    #[test]
    fn test_youtube_video_embeds() {
        let block = Block::Video {
            url: "https://www.youtube.com/watch?v=abc123&t=10".to_string(),
            provider: Some(VideoProvider::Youtube),
        };
        assert!(render_block(&block, 0).contains("https://www.youtube.com/embed/abc123"));
    }

    #[test]
    fn test_short_youtube_url_without_provider() {
        let block = Block::Video {
            url: "https://youtu.be/xyz789".to_string(),
            provider: None,
        };
        assert!(render_block(&block, 0).contains("https://www.youtube.com/embed/xyz789"));
    }

    #[test]
    fn test_direct_video_embeds_as_is() {
        let block = Block::Video {
            url: "https://cdn.example/clip.mp4".to_string(),
            provider: Some(VideoProvider::Direct),
        };
        assert!(render_block(&block, 0).contains("src=\"https://cdn.example/clip.mp4\""));
    }

    #[test]
    fn test_ad_slot_shows_position_and_ordinal() {
        let block = Block::Ad {
            position: Some(AdPosition::Top),
        };
        let html = render_block(&block, 4);
        assert!(html.contains("top"));
        assert!(html.contains("#5"));
    }

    #[test]
    fn test_ad_without_position_is_auto() {
        let block = Block::Ad { position: None };
        assert!(render_block(&block, 0).contains("auto"));
    }

    #[test]
    fn test_unknown_block_renders_nothing() {
        assert_eq!(render_block(&Block::Unknown, 0), "");
    }

    #[test]
    fn test_divider() {
        assert_eq!(render_block(&Block::Divider, 0), "<hr>\n");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }
}
