// Source file parsing for the data directory
use ahash::AHashSet;
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use subx_core::{KeyedVectors, Recipe, Vector};

pub const RECIPES_FILE: &str = "recipes.json";
pub const WORD_VECTORS_FILE: &str = "word_vectors.txt";
pub const DOC_VECTORS_FILE: &str = "doc_vectors.txt";
pub const STOPWORDS_FILE: &str = "stopwords.txt";

/// Paths of the source files inside a data directory
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub recipes: PathBuf,
    pub word_vectors: PathBuf,
    pub doc_vectors: PathBuf,
    /// Optional; a missing file means no global stopwords
    pub stopwords: PathBuf,
}

impl DataFiles {
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let dir = data_dir.as_ref();
        Self {
            recipes: dir.join(RECIPES_FILE),
            word_vectors: dir.join(WORD_VECTORS_FILE),
            doc_vectors: dir.join(DOC_VECTORS_FILE),
            stopwords: dir.join(STOPWORDS_FILE),
        }
    }

    /// Files that feed the bundle fingerprint, in a fixed order
    pub fn sources(&self) -> [&Path; 4] {
        [&self.recipes, &self.word_vectors, &self.doc_vectors, &self.stopwords]
    }
}

/// Parsed but not yet indexed source data
#[derive(Debug)]
pub struct SourceData {
    pub recipes: Vec<Recipe>,
    pub word_vectors: KeyedVectors,
    pub doc_vectors: KeyedVectors,
    pub stopwords: AHashSet<String>,
}

pub fn read_sources(files: &DataFiles) -> Result<SourceData> {
    let recipes = read_recipes(&files.recipes)?;
    let word_vectors = read_word2vec(&files.word_vectors)?;
    let doc_vectors = read_word2vec(&files.doc_vectors)?;
    let stopwords = read_stopwords(&files.stopwords)?;

    tracing::info!(
        recipes = recipes.len(),
        word_vectors = word_vectors.len(),
        doc_vectors = doc_vectors.len(),
        stopwords = stopwords.len(),
        "Source files parsed"
    );

    Ok(SourceData {
        recipes,
        word_vectors,
        doc_vectors,
        stopwords,
    })
}

pub fn read_recipes(path: &Path) -> Result<Vec<Recipe>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let recipes: Vec<Recipe> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(recipes)
}

pub fn read_word2vec(path: &Path) -> Result<KeyedVectors> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    parse_word2vec(BufReader::new(file)).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Parse the word2vec text format. The first line may be a `count dim`
/// header; every other non-blank line is a token followed by its values.
pub fn parse_word2vec<R: BufRead>(reader: R) -> Result<KeyedVectors> {
    let mut vectors: Option<KeyedVectors> = None;
    let mut declared: Option<(usize, usize)> = None;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let mut fields = line.split_whitespace();
        let Some(token) = fields.next() else {
            continue;
        };
        let values: Vec<&str> = fields.collect();

        if idx == 0 && values.len() == 1 {
            if let (Ok(count), Ok(dim)) = (token.parse::<usize>(), values[0].parse::<usize>()) {
                declared = Some((count, dim));
                vectors = Some(KeyedVectors::new(dim));
                continue;
            }
        }

        let data = values
            .iter()
            .map(|v| v.parse::<f32>())
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| anyhow!("line {}: invalid value for '{}': {}", line_no, token, e))?;
        if data.is_empty() {
            return Err(anyhow!("line {}: '{}' has no values", line_no, token));
        }

        let table = vectors.get_or_insert_with(|| KeyedVectors::new(data.len()));
        table
            .insert(token, Vector::new(data))
            .map_err(|e| anyhow!("line {}: {}", line_no, e))?;
    }

    let vectors = vectors.ok_or_else(|| anyhow!("no vectors found"))?;
    if let Some((count, _)) = declared {
        if count != vectors.len() {
            tracing::warn!(declared = count, actual = vectors.len(), "Vector count differs from header");
        }
    }
    Ok(vectors)
}

/// One stopword per line; blank lines and `#` comments are ignored
pub fn read_stopwords(path: &Path) -> Result<AHashSet<String>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No stopword file, using none");
        return Ok(AHashSet::new());
    }
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut stopwords = AHashSet::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() || word.starts_with('#') {
            continue;
        }
        stopwords.insert(word.to_string());
    }
    Ok(stopwords)
}
