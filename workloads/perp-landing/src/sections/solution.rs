//! "The Solution" section with feature cards.

use super::html_escape;
use crate::data::SolutionContent;

/// Render the solution section.
pub fn render_solution(content: &SolutionContent) -> String {
    let cards: String = content
        .features
        .iter()
        .map(|f| {
            format!(
                r#"<div class="feature-card">
            <h3 class="feature-title">{}</h3>
            <p class="feature-description">{}</p>
        </div>"#,
                html_escape(&f.title),
                html_escape(&f.description)
            )
        })
        .collect();

    format!(
        r#"<section class="solution" data-section="solution">
    <div class="section-header">
        <h2>{}</h2>
        <p>{}</p>
    </div>
    <div class="features-grid">
        {}
    </div>
</section>"#,
        html_escape(&content.section_title),
        html_escape(&content.section_subtitle),
        cards
    )
}
