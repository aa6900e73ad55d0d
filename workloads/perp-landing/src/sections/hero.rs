//! Hero banner section.

use super::html_escape;
use crate::data::HeroContent;

/// Render the hero banner section.
pub fn render_hero(content: &HeroContent) -> String {
    format!(
        r##"<section class="hero" data-section="hero">
    <div class="hero-content">
        <h1 class="hero-brand">{}</h1>
        <p class="hero-tagline">{}</p>
        <div class="hero-actions">
            <a href="{}" class="btn-outline">{}</a>
            <a href="#{}" class="btn-primary">{}</a>
        </div>
    </div>
</section>"##,
        html_escape(&content.brand),
        html_escape(&content.tagline),
        html_escape(&content.secondary_cta_url),
        html_escape(&content.secondary_cta_text),
        html_escape(&content.cta_anchor),
        html_escape(&content.cta_text)
    )
}
