pub mod inline;

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub use inline::RichText;

const BUILTIN_DECK: &str = include_str!("../../decks/frontend-architecture.yaml");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub transition: Option<String>,
}

/// Visual treatment of a slide. Navigation never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    #[default]
    Default,
    Title,
    Section,
    Code,
    Diagram,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContentBlock {
    Text {
        text: RichText,
    },
    List {
        items: Vec<RichText>,
    },
    Table {
        headers: Vec<RichText>,
        rows: Vec<Vec<RichText>>,
    },
    Code {
        #[serde(default)]
        language: Option<String>,
        code: String,
        #[serde(default)]
        caption: Option<String>,
    },
    Diagram {
        name: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlideRecord {
    pub id: u32,
    pub title: String,
    pub section: String,
    #[serde(default)]
    pub variant: Variant,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    #[default]
    Neutral,
    Accent,
    Muted,
}

/// A box placed in percent of the diagram area.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagramBox {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub detail: Option<String>,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default)]
    pub tone: Tone,
    /// Entrance delay after the slide mounts.
    #[serde(default)]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagramLink {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    pub caption: Option<String>,
    pub boxes: Vec<DiagramBox>,
    #[serde(default)]
    pub links: Vec<DiagramLink>,
}

impl Diagram {
    pub fn find_box(&self, name: &str) -> Option<&DiagramBox> {
        self.boxes.iter().find(|b| b.name == name)
    }
}

#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(flatten)]
    meta: DeckMeta,
    #[serde(default)]
    diagrams: BTreeMap<String, Diagram>,
    slides: Vec<SlideRecord>,
}

/// Problems in a deck that do not stop it from being presented.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckWarning {
    DuplicateId { id: u32, first: usize, second: usize },
    UnknownDiagram { slide: usize, name: String },
    UnknownLinkEndpoint { diagram: String, name: String },
}

impl fmt::Display for DeckWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id, first, second } => write!(
                f,
                "slide id {id} is used by slides {} and {}",
                first + 1,
                second + 1
            ),
            Self::UnknownDiagram { slide, name } => {
                write!(f, "slide {} references unknown diagram '{name}'", slide + 1)
            }
            Self::UnknownLinkEndpoint { diagram, name } => {
                write!(f, "diagram '{diagram}' links to unknown box '{name}'")
            }
        }
    }
}

/// The ordered, immutable collection of slides being presented.
///
/// Never empty: construction fails for a deck without slides.
#[derive(Debug, Clone)]
pub struct SlideStore {
    meta: DeckMeta,
    slides: Vec<SlideRecord>,
    diagrams: BTreeMap<String, Diagram>,
}

impl SlideStore {
    /// The deck compiled into the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_DECK).context("Built-in deck is malformed")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read deck {}", path.display()))?;
        Self::from_yaml(&contents).with_context(|| format!("Invalid deck {}", path.display()))
    }

    /// Load `path` if given, otherwise the built-in deck.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                if !p.exists() {
                    anyhow::bail!("File not found: {}", p.display());
                }
                Self::load(p)
            }
            None => Self::builtin(),
        }
    }

    pub fn from_yaml(src: &str) -> Result<Self> {
        let file: DeckFile = serde_yaml::from_str(src)?;
        if file.slides.is_empty() {
            anyhow::bail!("No slides found in deck");
        }
        let store = Self {
            meta: file.meta,
            slides: file.slides,
            diagrams: file.diagrams,
        };
        for warning in store.lint() {
            tracing::warn!("{warning}");
        }
        tracing::debug!(
            slides = store.slides.len(),
            diagrams = store.diagrams.len(),
            "deck loaded"
        );
        Ok(store)
    }

    pub fn meta(&self) -> &DeckMeta {
        &self.meta
    }

    pub fn slides(&self) -> &[SlideRecord] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn get(&self, index: usize) -> Option<&SlideRecord> {
        self.slides.get(index)
    }

    pub fn diagram(&self, name: &str) -> Option<&Diagram> {
        self.diagrams.get(name)
    }

    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or("archdeck")
    }

    /// Collect non-fatal problems. Slides are addressed by position, so a
    /// repeated id is reported but left as written.
    pub fn lint(&self) -> Vec<DeckWarning> {
        let mut warnings = Vec::new();

        let mut seen: HashMap<u32, usize> = HashMap::new();
        for (index, slide) in self.slides.iter().enumerate() {
            if let Some(&first) = seen.get(&slide.id) {
                warnings.push(DeckWarning::DuplicateId {
                    id: slide.id,
                    first,
                    second: index,
                });
            } else {
                seen.insert(slide.id, index);
            }

            for block in &slide.content {
                if let ContentBlock::Diagram { name } = block {
                    if !self.diagrams.contains_key(name) {
                        warnings.push(DeckWarning::UnknownDiagram {
                            slide: index,
                            name: name.clone(),
                        });
                    }
                }
            }
        }

        for (name, diagram) in &self.diagrams {
            for link in &diagram.links {
                for endpoint in [&link.from, &link.to] {
                    if diagram.find_box(endpoint).is_none() {
                        warnings.push(DeckWarning::UnknownLinkEndpoint {
                            diagram: name.clone(),
                            name: endpoint.clone(),
                        });
                    }
                }
            }
        }

        warnings
    }
}
