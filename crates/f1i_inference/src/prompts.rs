use f1i_core::{AnalysisResult, Article, Sentiment};

pub fn summary_prompt(article: &Article) -> String {
    format!(
        "Please summarize the following Formula 1 article:\n\nTitle: {}\n\nContent: {}\n\nSummary:",
        article.title, article.content
    )
}

pub fn analysis_prompt(article: &Article) -> String {
    format!(
        "Analyze the following Formula 1 news article.\n\n\
         Title: {}\n\n\
         Content: {}\n\n\
         Respond in exactly this layout:\n\
         Summary: <a concise summary in 2-4 sentences>\n\
         Sentiment: <positive, negative, neutral or mixed>\n\
         Entities: <comma-separated drivers, teams, people and organizations mentioned>",
        article.title, article.content
    )
}

pub fn comparison_prompt(report1: &str, report2: &str) -> String {
    format!(
        "Analyze and compare the recent performance of the following two Formula 1 drivers \
         based on the provided data. Focus on identifying strengths and weaknesses, \
         consistency, and significant results for both. Provide a conclusion on who \
         demonstrated superior or more consistent performance.\n\n\
         Driver 1 Data:\n{}\n\n\
         Driver 2 Data:\n{}\n\n\
         Present your analysis concisely, impartially, and in clear bullet points or \
         paragraphs. Avoid generic introductions and conclusions.",
        report1, report2
    )
}

#[derive(PartialEq)]
enum Field {
    None,
    Summary,
    Sentiment,
    Entities,
}

/// Parse the model's free-form response into an [`AnalysisResult`].
///
/// The prompt asks for Summary/Sentiment/Entities lines, but the model is
/// not guaranteed to comply; output without the markers is kept verbatim
/// as the summary with a neutral sentiment.
pub fn parse_analysis(text: &str) -> AnalysisResult {
    let mut summary_lines: Vec<String> = Vec::new();
    let mut sentiment: Option<Sentiment> = None;
    let mut entities: Vec<String> = Vec::new();
    let mut field = Field::None;
    let mut saw_marker = false;

    for line in text.lines() {
        let stripped = line
            .trim()
            .trim_start_matches(['#', '*', '-', ' '])
            .trim_end_matches(['*', ' ']);
        if let Some(rest) = strip_label(stripped, "summary") {
            field = Field::Summary;
            saw_marker = true;
            if !rest.is_empty() {
                summary_lines.push(rest.to_string());
            }
        } else if let Some(rest) = strip_label(stripped, "sentiment") {
            field = Field::Sentiment;
            saw_marker = true;
            if !rest.is_empty() {
                sentiment = Some(Sentiment::from_label(rest));
            }
        } else if let Some(rest) = strip_label(stripped, "entities") {
            field = Field::Entities;
            saw_marker = true;
            entities.extend(split_entities(rest));
        } else if !stripped.is_empty() {
            match field {
                Field::Summary => summary_lines.push(stripped.to_string()),
                Field::Sentiment => {
                    if sentiment.is_none() {
                        sentiment = Some(Sentiment::from_label(stripped));
                    }
                }
                Field::Entities => entities.extend(split_entities(stripped)),
                Field::None => {}
            }
        }
    }

    if !saw_marker {
        return AnalysisResult {
            summary: text.trim().to_string(),
            sentiment: Sentiment::Neutral,
            entities: Vec::new(),
        };
    }

    let summary = if summary_lines.is_empty() {
        text.trim().to_string()
    } else {
        summary_lines.join("\n")
    };
    AnalysisResult {
        summary,
        sentiment: sentiment.unwrap_or(Sentiment::Neutral),
        entities,
    }
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    if !head.eq_ignore_ascii_case(label) {
        return None;
    }
    let rest = &line[label.len()..];
    // Only treat it as a marker when a separator follows the label.
    if !rest.starts_with(':') && !rest.starts_with('*') && !rest.trim().is_empty() {
        return None;
    }
    Some(rest.trim_start_matches([':', '*', ' ']).trim())
}

fn split_entities(text: &str) -> Vec<String> {
    text.split([',', ';'])
        .map(|e| e.trim().trim_start_matches(['-', '*', ' ']).trim().to_string())
        .filter(|e| !e.is_empty() && e.to_lowercase() != "none")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_analysis() {
        let text = "Summary: Verstappen won in Bahrain ahead of Perez.\n\
                    Sentiment: Positive\n\
                    Entities: Max Verstappen, Sergio Perez, Red Bull";
        let result = parse_analysis(text);
        assert_eq!(result.summary, "Verstappen won in Bahrain ahead of Perez.");
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(
            result.entities,
            vec!["Max Verstappen", "Sergio Perez", "Red Bull"]
        );
    }

    #[test]
    fn test_parse_markdown_flavoured_analysis() {
        let text = "**Summary:** Ferrari struggled with tyre wear.\n\
                    It cost them the podium.\n\
                    **Sentiment:** negative\n\
                    **Entities:**\n\
                    - Ferrari\n\
                    - Charles Leclerc";
        let result = parse_analysis(text);
        assert!(result.summary.starts_with("Ferrari struggled"));
        assert!(result.summary.contains("It cost them the podium."));
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.entities, vec!["Ferrari", "Charles Leclerc"]);
    }

    #[test]
    fn test_parse_malformed_output_kept_verbatim() {
        let text = "The model rambled on without any structure at all.";
        let result = parse_analysis(text);
        assert_eq!(result.summary, text);
        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_parse_skips_none_entities() {
        let text = "Summary: Quiet week.\nSentiment: neutral\nEntities: none";
        let result = parse_analysis(text);
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_label_requires_separator() {
        // "Summary of the season" mid-sentence is not a marker line.
        let text = "Summary of the season so far in one paragraph.";
        let result = parse_analysis(text);
        assert_eq!(result.summary, text);
    }

    #[test]
    fn test_prompts_carry_inputs() {
        let article = f1i_core::Article::from_text("Alonso extends Aston Martin deal.");
        assert!(analysis_prompt(&article).contains("Alonso extends"));
        assert!(summary_prompt(&article).contains("Alonso extends"));
        let prompt = comparison_prompt("report one", "report two");
        assert!(prompt.contains("report one"));
        assert!(prompt.contains("report two"));
    }
}
