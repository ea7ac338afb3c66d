//! Generation settings: which column feeds which placeholder, where pictures
//! and badge icons live.
//!
//! Every field has a default matching the stock reference template, so an
//! empty JSON object is a valid configuration.

use crate::badges::{BadgeIcon, BadgeSet};
use crate::error::Result;
use crate::format::ValueFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the picture slot in the stock template.
pub const DEFAULT_IMAGE_TARGET: &str = "IMAGE_PROJET";

/// Image extensions tried, in order, for a picture stem.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// One placeholder fed from one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderMapping {
    /// Token as written in the template, e.g. `{{Ville}}`.
    pub placeholder: String,
    /// Source column. Empty leaves the placeholder untouched.
    #[serde(default)]
    pub column: String,
    #[serde(default)]
    pub format: Option<ValueFormat>,
}

impl PlaceholderMapping {
    pub fn new(placeholder: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            column: column.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// The per-row picture.
///
/// The digits of `column` form a file stem looked up in `dir` with each of
/// `extensions` in turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSlot {
    /// Shape name of the picture slot.
    pub target: String,
    pub column: String,
    pub dir: PathBuf,
    pub extensions: Vec<String>,
}

impl Default for ImageSlot {
    fn default() -> Self {
        Self {
            target: DEFAULT_IMAGE_TARGET.to_string(),
            column: "Numero_Projet".to_string(),
            dir: PathBuf::from("img"),
            extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl ImageSlot {
    /// Candidate image paths for a cell value, in lookup order.
    ///
    /// Empty when the value holds no digit.
    pub fn candidates(&self, value: &str) -> Vec<PathBuf> {
        let stem: String = value.chars().filter(char::is_ascii_digit).collect();
        if stem.is_empty() {
            return Vec::new();
        }
        self.extensions
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", stem, ext)))
            .collect()
    }
}

/// Everything [`crate::generate`] needs besides the deck and the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub placeholders: Vec<PlaceholderMapping>,
    pub image: Option<ImageSlot>,
    pub badges: Option<BadgeSet>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let placeholders = vec![
            PlaceholderMapping::new("{{Titre_Residence}}", "Nom de la residence"),
            PlaceholderMapping::new("{{Ville}}", "Ville"),
            PlaceholderMapping::new("{{Details}}", "details"),
            PlaceholderMapping::new("{{Maitre_Ouvrage}}", "Maitre d'ouvrage"),
            PlaceholderMapping::new("{{Assistant}}", "Assistant"),
            PlaceholderMapping::new("{{Montant_Travaux}}", "montant des travaux")
                .with_format(ValueFormat::Currency),
            PlaceholderMapping::new("{{Type_Travaux}}", "type de travaux"),
            PlaceholderMapping::new("{{Dates_Realisation}}", "realisation"),
            PlaceholderMapping::new("{{Surface}}", "Surface").with_format(ValueFormat::Area),
            PlaceholderMapping::new("{{Travaux_Exterieurs}}", "travaux exterieurs"),
            PlaceholderMapping::new("{{Travaux_Interieurs}}", "travaux interieurs"),
        ];

        let icons = [
            ("PMR", "1.png"),
            ("LABEL EFFINERGIE", "2.png"),
            ("LABEL EFFINERGIE BDM Bronze", "3.png"),
            ("TRAVAUX EN SITE OCCUPE", "4.png"),
            ("ABF", "5.png"),
            ("LABEL HPE RENOV", "6.png"),
            ("AMELIORATION ETIQUETTE ENERGETIQUE", "7.png"),
            ("ENERGIE SPRONG", "8.png"),
            ("LABEL BBC CERQUAL", "9.png"),
        ]
        .into_iter()
        .map(|(column, icon)| BadgeIcon::new(column, icon))
        .collect();

        Self {
            placeholders,
            image: Some(ImageSlot::default()),
            badges: Some(BadgeSet {
                icons,
                ..BadgeSet::default()
            }),
        }
    }
}

impl GenerationConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Look for per-row pictures in `dir`.
    pub fn with_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        if let Some(image) = self.image.as_mut() {
            image.dir = dir.into();
        }
        self
    }

    /// Look for badge icons in `dir`.
    pub fn with_badge_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        if let Some(badges) = self.badges.as_mut() {
            badges.dir = dir.into();
        }
        self
    }

    /// Cell value that turns a badge on.
    pub fn with_activation(mut self, value: impl Into<String>) -> Self {
        if let Some(badges) = self.badges.as_mut() {
            badges.activation = value.into();
        }
        self
    }
}
