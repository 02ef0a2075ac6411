//! Prompt construction for the remote predictor.

/// The parties tracked in the prediction, with fixed leaders and chart
/// color tags. The remote service fills in the percentages.
pub const PARTIES: [(&str, &str, &str); 5] = [
    ("Awami League", "Sheikh Hasina", "#006a4e"),
    ("BNP", "Tarique Rahman", "#ffcd00"),
    ("Jatiya Party", "G.M. Quader", "#ff0000"),
    ("Jamaat-e-Islami", "Dr. Shafiqur Rahman", "#0d9488"),
    ("Others", "Various", "#64748b"),
];

/// Build the analysis prompt for the given election date label.
///
/// The structure mirrors the JSON payload the client parses; the service is
/// told to ground itself on social platforms rather than news media.
pub fn build_prompt(election_date: &str) -> String {
    let prediction_lines: Vec<String> = PARTIES
        .iter()
        .map(|(party, leader, color)| {
            format!(
                r#"        {{"party": "{party}", "percentage": number, "leader": "{leader}", "color": "{color}"}}"#
            )
        })
        .collect();

    format!(
        r#"Analyze the political landscape for the Bangladesh general election for {election_date}.

CRITICAL INSTRUCTION: Do NOT collect or use information from traditional Bangladesh news media outlets.

INSTEAD: Rely exclusively on "people impression" by scanning Facebook and YouTube.

Format the response as a JSON object with this exact structure:
{{
    "predictions": [
{predictions}
    ],
    "analysis": "A brief analysis of the current digital pulse.",
    "likelyPrimeMinister": "Name of the person most likely to be Prime Minister",
    "sentimentFeed": [
        {{
            "platform": "facebook" | "youtube",
            "username": "Generic BD name",
            "content": "A short, representative comment or post content reflecting current public pulse",
            "sentiment": "pro-al" | "pro-bnp" | "pro-jam" | "neutral",
            "timestamp": "Just now"
        }}
    ]
}}

Provide 4 items in the sentimentFeed that act as "evidence" for the current shift.
Ensure percentages sum to 100."#,
        predictions = prediction_lines.join(",\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_interpolates_the_election_date() {
        let prompt = build_prompt("12th February 2026");
        assert!(prompt.contains("12th February 2026"));
    }

    #[test]
    fn prompt_names_every_tracked_party() {
        let prompt = build_prompt("12th February 2026");
        for (party, leader, color) in PARTIES {
            assert!(prompt.contains(party));
            assert!(prompt.contains(leader));
            assert!(prompt.contains(color));
        }
    }
}
