use canonical::{seed_hue, tokenize};
use markup::{build, paragraphs, OverlapStats, Segment};
use matcher::{label, match_tokens, LabelConfig, Side};

fn main() {
    let source = "The storm closed the coastal road on Friday.\n\nCrews expect to reopen it next week.";
    let summary = "Crews expect the coastal road to reopen next week.";

    let ta = tokenize(source);
    let tb = tokenize(summary);
    let pairs = match label(&match_tokens(&ta, &tb), &ta, &tb, &LabelConfig::default()) {
        Ok(pairs) => pairs,
        Err(err) => {
            eprintln!("labeling failed: {err}");
            return;
        }
    };

    for (side, tokens, text) in [(Side::A, &ta, source), (Side::B, &tb, summary)] {
        let segments = match build(tokens, text, &pairs, side) {
            Ok(segments) => segments,
            Err(err) => {
                eprintln!("markup failed: {err}");
                return;
            }
        };
        let stats = OverlapStats::from_segments(&segments);
        println!(
            "side {side:?}: {:.0}% of {} words copied",
            stats.percent_overlap * 100.0,
            stats.num_words
        );
        for paragraph in paragraphs(&segments) {
            let line: String = paragraph.iter().map(render).collect();
            println!("  {line}");
        }
    }
}

fn render(segment: &Segment) -> String {
    match segment {
        Segment::Plain { text } => text.clone(),
        Segment::Span {
            text,
            span_pair_id,
            color_seed,
        } => format!("[{text}]#{span_pair_id}@{}", seed_hue(color_seed)),
    }
}
