//! Wiring between the command line and the library crates.

use anyhow::{Context as _, Result, anyhow, bail};
use rmai_core::Location;
use rmai_data::{DatasetCache, DatasetClient, DatasetConfig};
use rmai_model::{ChatClient, GenerationConfig, Generator};
use rmai_notes::{Note, NoteStore, encode_embedding};
use rmai_rag::{Document, OpenAIEmbeddingProvider, RagConfig, Vectorizer, rank_documents};
use tracing::info;

use crate::cli::{Cli, Command, NoteCommand};
use crate::output;

/// Everything a command may need, built once from the global options.
pub struct App {
    cache: DatasetCache,
    notes: NoteStore,
    vectorizer: Vectorizer,
    generator: Generator,
}

impl App {
    pub async fn from_cli(cli: &Cli) -> Result<Self> {
        let client = DatasetClient::new(DatasetConfig::default().with_endpoint(&cli.graphql_url))?;
        let cache = DatasetCache::new(client).with_snapshot(&cli.cache_file);
        if cli.refresh {
            cache.invalidate().await;
        }

        let notes = NoteStore::open(&cli.notes_db)
            .await
            .with_context(|| format!("opening notes database {}", cli.notes_db.display()))?;

        let (vectorizer, generator) = match cli.openai_api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => {
                info!("using OpenAI for embeddings and generation");
                (
                    Vectorizer::with_remote(OpenAIEmbeddingProvider::new(key)?, RagConfig::default()),
                    Generator::new(ChatClient::new(key, GenerationConfig::default())?),
                )
            }
            None => (Vectorizer::local(RagConfig::default()), Generator::template_only()),
        };

        Ok(Self { cache, notes, vectorizer, generator })
    }

    pub async fn run(&self, command: &Command) -> Result<String> {
        match command {
            Command::Locations => self.locations().await,
            Command::Residents { location } => self.residents(location).await,
            Command::Note(NoteCommand::Add { character_id, text }) => {
                self.add_note(character_id, text).await
            }
            Command::Note(NoteCommand::List { character_id }) => {
                self.list_notes(character_id.as_deref()).await
            }
            Command::Summarize { location } => self.summarize(location).await,
            Command::Dialogue { first, second } => self.dialogue(first, second).await,
            Command::Search { location, query, top_k } => {
                self.search(location, query, *top_k).await
            }
        }
    }

    async fn location(&self, name: &str) -> Result<Location> {
        self.cache.find_location(name).await?.ok_or_else(|| anyhow!("unknown location '{name}'"))
    }

    async fn locations(&self) -> Result<String> {
        let locations = self.cache.locations().await?;
        Ok(output::format_locations(&locations))
    }

    async fn residents(&self, name: &str) -> Result<String> {
        let location = self.location(name).await?;
        let mut sections = vec![output::format_location_header(&location)];
        for resident in &location.residents {
            let notes = self.notes.list_by_character(&resident.id).await?;
            sections.push(output::format_resident(resident, &notes));
        }
        Ok(sections.join("\n\n"))
    }

    async fn add_note(&self, character_id: &str, text: &str) -> Result<String> {
        let characters = self.cache.characters().await?;
        let character = characters
            .get(character_id)
            .ok_or_else(|| anyhow!("unknown character id '{character_id}'"))?;

        // a local vector only means something inside the batch it came from
        let embedding = if self.vectorizer.has_remote() {
            let vectors = self.vectorizer.embed(&[text.trim()]).await?;
            vectors.first().map(|v| encode_embedding(v))
        } else {
            None
        };

        let id = self.notes.add_note(&character.id, &character.name, text, embedding).await?;
        Ok(format!("Added note #{id} for {}", character.name))
    }

    async fn list_notes(&self, character_id: Option<&str>) -> Result<String> {
        let notes = match character_id {
            Some(id) => self.notes.list_by_character(id).await?,
            None => self.notes.list_all().await?,
        };
        Ok(output::format_notes(&notes))
    }

    async fn summarize(&self, name: &str) -> Result<String> {
        let location = self.location(name).await?;
        let summary = self.generator.summarize_location(&location).await;
        let report = rmai_eval::evaluate(&summary, &location);
        Ok(output::format_summary(&summary, &report))
    }

    async fn dialogue(&self, first: &str, second: &str) -> Result<String> {
        let characters = self.cache.characters().await?;
        let (Some(a), Some(b)) = (characters.find_by_name(first), characters.find_by_name(second))
        else {
            bail!("pick two valid characters");
        };
        Ok(self.generator.generate_dialogue(a, b).await)
    }

    async fn search(&self, name: &str, query: &str, top_k: usize) -> Result<String> {
        let location = self.location(name).await?;
        let notes = self.notes.list_all().await?;
        let corpus = search_corpus(&notes, &location);
        let results = rank_documents(&self.vectorizer, query, &corpus, top_k).await?;
        Ok(output::format_search(&results))
    }
}

/// Every note plus one pseudo-note per resident of `location`.
pub fn search_corpus(notes: &[Note], location: &Location) -> Vec<Document> {
    let from_notes = notes.iter().map(|note| {
        Document::new(format!("note:{}", note.id), note.content.clone())
            .with_provenance(note.character_name.clone())
    });
    let from_residents = location.residents.iter().map(|resident| {
        let text = format!(
            "[resident] {} {} {} {} {}",
            resident.name, resident.species, resident.status, location.name, location.kind
        );
        Document::new(format!("resident:{}", resident.id), text)
            .with_provenance(resident.name.clone())
    });
    from_notes.chain(from_residents).collect()
}
