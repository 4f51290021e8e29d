use ruleseg::{SegmentResultVerbose, Span};
use std::borrow::Cow;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(res: &SegmentResultVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    let details = &res.details;
    let title = format!("⚙  Segmenting ({}): \"{}\"", details.rule_set, visible(&res.text));
    println!("\n{}", palette.bold(palette.paint(title, ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Segments ━━━", ansi::GRAY));
    if res.segments.is_empty() {
        println!("{}", palette.dim("  No segments"));
    } else {
        for (idx, span) in res.segments.iter().enumerate() {
            print_segment(idx, span, &palette);
        }
    }

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    for (rule, count) in &details.rule_counts {
        println!("  {} {}", palette.paint(format!("{rule:<10}"), ansi::BLUE), palette.dim(format!("× {count}")));
    }
    if !details.suppressed.is_empty() {
        let offsets: Vec<String> = details.suppressed.iter().map(|b| b.to_string()).collect();
        println!("  {} {}", palette.paint("suppressed", ansi::YELLOW), palette.dim(offsets.join(", ")));
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Boundaries: {}",
        palette.paint(format!("{:?}", details.total), ansi::GREEN),
        palette.paint(details.boundaries.len().to_string(), ansi::CYAN),
    );
    println!();
}

fn print_segment(idx: usize, span: &Span, palette: &ansi::Palette) {
    println!(
        "  {} {} {} {} {} {}",
        palette.paint(format!("[{idx}]"), ansi::GRAY),
        palette.paint(format!("{}..{}", span.start, span.end), ansi::YELLOW),
        palette.bold(palette.paint(format!("\"{}\"", visible(&span.text)), ansi::GREEN)),
        palette.dim("│ status:"),
        palette.paint(span.status.to_string(), ansi::CYAN),
        palette.dim(format!("│ rule: {}", span.rule)),
    );
}

/// Escape line breaks and tabs so each segment prints on one line.
fn visible(text: &str) -> Cow<'_, str> {
    ruleseg::regex!(r"[\r\n\t]").replace_all(text, |caps: &regex::Captures<'_>| match &caps[0] {
        "\r" => "\\r",
        "\n" => "\\n",
        _ => "\\t",
    })
}
