//! Marketing copy for the landing page.

use serde::{Deserialize, Serialize};

/// Hero banner content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroContent {
    pub brand: String,
    pub tagline: String,
    pub secondary_cta_text: String,
    pub secondary_cta_url: String,
    pub cta_text: String,
    /// In-page anchor of the waitlist section.
    pub cta_anchor: String,
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            brand: "Perfx".to_string(),
            tagline: "24/7 Perpetual futures exchange for currencies".to_string(),
            secondary_cta_text: "Read Whitepaper".to_string(),
            secondary_cta_url: "/whitepaper".to_string(),
            cta_text: "Join Waitlist".to_string(),
            cta_anchor: "waitlist".to_string(),
        }
    }
}

/// A feature card in the solution section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
}

impl Feature {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// "The Solution" section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionContent {
    pub section_title: String,
    pub section_subtitle: String,
    pub features: Vec<Feature>,
}

impl Default for SolutionContent {
    fn default() -> Self {
        Self {
            section_title: "The Solution".to_string(),
            section_subtitle: "Onchain Orderbook based perpetual futures exchange for currencies enabling 24/7 margin trading.".to_string(),
            features: vec![
                Feature::new(
                    "24/7 Trading",
                    "Trade anytime, even after traditional markets are closed",
                ),
                Feature::new(
                    "Democratising Access",
                    "Open forex trading to previously restricted regions",
                ),
                Feature::new(
                    "Low Cost Trading",
                    "Compared to traditional financial alternatives",
                ),
                Feature::new("Real-time Trading", "Immutable, manipulation-free environment"),
                Feature::new(
                    "Hedge Forex Exposure",
                    "Without relying on centralized institutions",
                ),
                Feature::new(
                    "Deep Liquidity",
                    "Exchange tailored for high-frequency forex trading",
                ),
            ],
        }
    }
}

/// Solana pitch section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PitchContent {
    pub headline: String,
    pub body: String,
}

impl Default for PitchContent {
    fn default() -> Self {
        Self {
            headline: "Bringing the Largest Financial Market to Solana".to_string(),
            body: "Our innovative approach to funding rates and margin requirements enables trading even after traditional markets close, mimicking Trad-Fi OTC's while providing the benefits of decentralization.".to_string(),
        }
    }
}

/// Waitlist section copy. Feedback texts live with the submission flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistCopy {
    pub headline: String,
    pub subheadline: String,
    pub placeholder: String,
    pub submit_text: String,
    pub submitting_text: String,
}

impl Default for WaitlistCopy {
    fn default() -> Self {
        Self {
            headline: "Join the Waitlist".to_string(),
            subheadline: "Be among the first to experience the future of currency trading."
                .to_string(),
            placeholder: "Enter your email".to_string(),
            submit_text: "Join Now".to_string(),
            submitting_text: "Joining...".to_string(),
        }
    }
}

/// Full page content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandingContent {
    pub hero: HeroContent,
    pub solution: SolutionContent,
    pub pitch: PitchContent,
    pub waitlist: WaitlistCopy,
}
