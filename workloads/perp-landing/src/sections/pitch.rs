//! Solana pitch section.

use super::html_escape;
use crate::data::PitchContent;

pub fn render_pitch(content: &PitchContent) -> String {
    format!(
        r#"<section class="pitch" data-section="pitch">
    <div class="pitch-copy">
        <h2>{}</h2>
        <p>{}</p>
    </div>
</section>"#,
        html_escape(&content.headline),
        html_escape(&content.body)
    )
}
