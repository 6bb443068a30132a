//! Artifact generators
//!
//! Each generator turns a [`GenerationRequest`] into zero or more
//! [`GeneratedFile`]s. Generators never write to the filesystem themselves;
//! the orchestrator hands their output to a
//! [`FileWriter`](crate::writer::FileWriter).

pub mod context;
pub mod renderer;
pub mod stubs;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDateTime};
use serde_json::json;

pub use context::{build_context, ClassTarget};
pub use renderer::StubRenderer;

use crate::artifact::ArtifactKind;
use crate::naming::ModelNames;
use crate::request::GenerationRequest;

/// How a generated file is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteMode {
    /// Create a new file; existing files are only replaced with `--force`
    Create,
    /// Append to the file, creating it with `header` first if needed
    Append {
        /// Content written before the first appended block
        header: String,
    },
}

/// One file produced by a generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Kind that produced the file
    pub kind: ArtifactKind,
    /// Path relative to the plugin root
    pub path: PathBuf,
    /// Rendered content
    pub content: String,
    /// Write behaviour
    pub mode: WriteMode,
}

impl GeneratedFile {
    /// A file that is created from scratch
    #[must_use]
    pub fn create(kind: ArtifactKind, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            content: content.into(),
            mode: WriteMode::Create,
        }
    }

    /// A block appended to a possibly existing file
    #[must_use]
    pub fn append(
        kind: ArtifactKind,
        path: impl Into<PathBuf>,
        content: impl Into<String>,
        header: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            content: content.into(),
            mode: WriteMode::Append {
                header: header.into(),
            },
        }
    }
}

/// Produces the files for one artifact kind
pub trait ArtifactGenerator {
    /// Generate files for `request`
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedFile>>;
}

impl<F> ArtifactGenerator for F
where
    F: Fn(&GenerationRequest) -> Result<Vec<GeneratedFile>>,
{
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedFile>> {
        self(request)
    }
}

/// Renders one class stub to the kind's [`ClassTarget`]
#[derive(Debug, Clone)]
pub struct ClassGenerator {
    kind: ArtifactKind,
    stub: &'static str,
    renderer: Arc<StubRenderer>,
}

impl ClassGenerator {
    /// Generator for `kind` rendering the stub named `stub`
    #[must_use]
    pub const fn new(kind: ArtifactKind, stub: &'static str, renderer: Arc<StubRenderer>) -> Self {
        Self {
            kind,
            stub,
            renderer,
        }
    }
}

impl ArtifactGenerator for ClassGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedFile>> {
        let target = ClassTarget::for_kind(self.kind, request)
            .ok_or_else(|| anyhow!("{} is not a class artifact", self.kind))?;

        let mut context = build_context(request);
        context["target"] = json!(target);
        context["rules_key"] = json!(match self.kind {
            ArtifactKind::UpdateRequest => "update_rules",
            _ => "create_rules",
        });

        let content = self.renderer.render(self.stub, &context)?;
        Ok(vec![GeneratedFile::create(self.kind, target.path, content)])
    }
}

const MIGRATIONS_DIR: &str = "database/migrations";

/// Length of the `%Y_%m_%d_%H%M%S` prefix of a migration file name
const MIGRATION_STAMP_LEN: usize = 17;

/// Writes `database/migrations/<timestamp>_create_<table>_table.php`
///
/// When a create migration for the table already exists below the plugin
/// root, its file name is reused so a forced re-run replaces it instead of
/// adding a second migration for the same table.
#[derive(Debug, Clone)]
pub struct MigrationGenerator {
    renderer: Arc<StubRenderer>,
    timestamp: Option<NaiveDateTime>,
}

impl MigrationGenerator {
    /// Migration generator stamped with the current local time
    #[must_use]
    pub const fn new(renderer: Arc<StubRenderer>) -> Self {
        Self {
            renderer,
            timestamp: None,
        }
    }

    /// Use a fixed timestamp instead of the clock
    #[must_use]
    pub fn at(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// File name for `table` at `timestamp`
    #[must_use]
    pub fn file_name(table: &str, timestamp: NaiveDateTime) -> String {
        format!(
            "{}_create_{table}_table.php",
            timestamp.format("%Y_%m_%d_%H%M%S")
        )
    }

    /// Latest existing create migration for `table` below `root`
    #[must_use]
    pub fn existing_file_name(root: &Path, table: &str) -> Option<String> {
        let suffix = format!("_create_{table}_table.php");
        let entries = fs::read_dir(root.join(MIGRATIONS_DIR)).ok()?;

        entries
            .filter_map(std::result::Result::ok)
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| {
                name.strip_suffix(&suffix).is_some_and(|stamp| {
                    stamp.len() == MIGRATION_STAMP_LEN
                        && stamp.chars().all(|c| c.is_ascii_digit() || c == '_')
                })
            })
            .max()
    }
}

impl ArtifactGenerator for MigrationGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedFile>> {
        let table = ModelNames::new(request.model()).table;
        let timestamp = self
            .timestamp
            .unwrap_or_else(|| Local::now().naive_local());

        let content = self
            .renderer
            .render("migration", &build_context(request))
            .context("Failed to render migration")?;

        let file_name = Self::existing_file_name(request.plugin_path(), &table).map_or_else(
            || Self::file_name(&table, timestamp),
            |existing| {
                tracing::debug!(file = %existing, "reusing existing migration name");
                existing
            },
        );
        let path = PathBuf::from(MIGRATIONS_DIR).join(file_name);
        Ok(vec![GeneratedFile::create(ArtifactKind::Migration, path, content)])
    }
}

/// Appends a `Route::apiResource` line to `routes/api.php`
#[derive(Debug, Clone)]
pub struct RoutesGenerator {
    renderer: Arc<StubRenderer>,
}

impl RoutesGenerator {
    /// Routes generator using `renderer`
    #[must_use]
    pub const fn new(renderer: Arc<StubRenderer>) -> Self {
        Self { renderer }
    }
}

impl ArtifactGenerator for RoutesGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<GeneratedFile>> {
        let line = self.renderer.render("routes", &build_context(request))?;
        Ok(vec![GeneratedFile::append(
            ArtifactKind::Routes,
            "routes/api.php",
            line,
            stubs::ROUTES_HEADER,
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::GenerateOption;
    use crate::request::{OptionFlags, Selection};
    use crate::schema::SchemaDefinition;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn renderer() -> Arc<StubRenderer> {
        Arc::new(StubRenderer::new().unwrap())
    }

    fn request(schema: &str, flags: OptionFlags) -> GenerationRequest {
        GenerationRequest::new(
            "Post".to_string(),
            Selection::from_flags(&flags),
            SchemaDefinition::from_schema_str(Some(schema)).unwrap(),
            "default".to_string(),
            PathBuf::from("."),
            "App".to_string(),
        )
    }

    fn render(kind: ArtifactKind, stub: &'static str, request: &GenerationRequest) -> GeneratedFile {
        let mut files = ClassGenerator::new(kind, stub, renderer())
            .generate(request)
            .unwrap();
        assert_eq!(files.len(), 1);
        files.remove(0)
    }

    #[test]
    fn test_model_plain() {
        let file = render(
            ArtifactKind::Model,
            "model",
            &request("title:string,published:boolean", OptionFlags::default()),
        );
        assert_eq!(file.path, PathBuf::from("app/Models/Post.php"));
        assert!(file.content.contains("namespace App\\Models;"));
        assert!(file.content.contains("class Post extends Model"));
        assert!(file.content.contains("        'title',\n"));
        assert!(file.content.contains("'published' => 'boolean'"));
        assert!(file.content.contains("    use HasFactory;\n"));
        assert!(!file.content.contains("SoftDeletes"));
        assert!(!file.content.contains("Filterable"));
    }

    #[test]
    fn test_model_with_soft_delete_and_filter() {
        let flags = OptionFlags::default()
            .with(GenerateOption::SoftDelete)
            .with(GenerateOption::Filter);
        let file = render(ArtifactKind::Model, "model", &request("title:string", flags));
        assert!(file
            .content
            .contains("use Illuminate\\Database\\Eloquent\\SoftDeletes;"));
        assert!(file.content.contains("use HasFactory, SoftDeletes, Filterable;"));
        assert!(file.content.contains("protected string $default_filters = PostFilters::class;"));
    }

    #[test]
    fn test_model_relations() {
        let file = render(
            ArtifactKind::Model,
            "model",
            &request("author_id:foreignId", OptionFlags::default()),
        );
        assert!(file.content.contains("public function author(): BelongsTo"));
        assert!(file
            .content
            .contains("return $this->belongsTo(\\App\\Models\\Author::class);"));
    }

    #[test]
    fn test_requests_use_their_rules() {
        let schema = "title:string:unique";
        let create = render(
            ArtifactKind::CreateRequest,
            "request",
            &request(schema, OptionFlags::default()),
        );
        assert_eq!(
            create.path,
            PathBuf::from("app/Http/Requests/Post/CreatePostRequest.php")
        );
        assert!(create
            .content
            .contains("'title' => 'required|string|max:255|unique:posts,title',"));

        let update = render(
            ArtifactKind::UpdateRequest,
            "request",
            &request(schema, OptionFlags::default()),
        );
        assert!(update.content.contains("class UpdatePostRequest extends FormRequest"));
        assert!(update.content.contains("'title' => 'sometimes|string|max:255',"));
    }

    #[test]
    fn test_controller_adapts_to_selection() {
        let bare = render(
            ArtifactKind::Controller,
            "controller",
            &request("title:string", OptionFlags::default()),
        );
        assert!(bare.content.contains("use Illuminate\\Http\\Request;"));
        assert!(bare.content.contains("Post::create($request->all())"));
        assert!(!bare.content.contains("PostResource"));

        let flags = OptionFlags::default()
            .with(GenerateOption::Request)
            .with(GenerateOption::Resource)
            .with(GenerateOption::Filter);
        let full = render(ArtifactKind::Controller, "controller", &request("title:string", flags));
        assert!(full.content.contains("public function store(CreatePostRequest $request)"));
        assert!(full.content.contains("Post::create($request->validated())"));
        assert!(full.content.contains("PostResource::collection($posts)"));
        assert!(full.content.contains("Post::useFilters()->paginate()"));
    }

    #[test]
    fn test_migration_file() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap();
        let generator = MigrationGenerator::new(renderer()).at(timestamp);
        let flags = OptionFlags::default().with(GenerateOption::SoftDelete);
        let files = generator
            .generate(&request("title:string:unique,body:text:nullable", flags))
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].path,
            PathBuf::from("database/migrations/2024_03_09_140507_create_posts_table.php")
        );
        let content = &files[0].content;
        assert!(content.contains("Schema::create('posts', function (Blueprint $table) {"));
        assert!(content.contains("            $table->string('title')->unique();\n"));
        assert!(content.contains("            $table->text('body')->nullable();\n"));
        assert!(content.contains("            $table->softDeletes();\n"));
    }

    #[test]
    fn test_feature_test_interpolates_endpoint() {
        let file = render(
            ArtifactKind::Test,
            "test",
            &request("title:string", OptionFlags::default()),
        );
        assert_eq!(file.path, PathBuf::from("tests/Feature/PostTest.php"));
        assert!(file.content.contains("protected string $endpoint = '/api/posts';"));
        assert!(file
            .content
            .contains("$this->getJson(\"{$this->endpoint}/{$post->id}\")->assertOk();"));
        assert!(file.content.contains("$this->assertModelMissing($post);"));
    }

    #[test]
    fn test_migration_reuses_existing_file_name() {
        let dir = TempDir::new().unwrap();
        let migrations = dir.path().join("database/migrations");
        fs::create_dir_all(&migrations).unwrap();
        fs::write(migrations.join("2023_01_02_030405_create_posts_table.php"), "").unwrap();
        fs::write(migrations.join("2023_05_06_070809_create_blog_posts_table.php"), "").unwrap();
        fs::write(migrations.join("notes_create_posts_table.php"), "").unwrap();

        assert_eq!(
            MigrationGenerator::existing_file_name(dir.path(), "posts").as_deref(),
            Some("2023_01_02_030405_create_posts_table.php")
        );
        assert_eq!(MigrationGenerator::existing_file_name(dir.path(), "tags"), None);

        let request = GenerationRequest::new(
            "Post".to_string(),
            Selection::from_flags(&OptionFlags::default()),
            SchemaDefinition::default(),
            "default".to_string(),
            dir.path().to_path_buf(),
            "App".to_string(),
        );
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap();
        let files = MigrationGenerator::new(renderer())
            .at(timestamp)
            .generate(&request)
            .unwrap();
        assert_eq!(
            files[0].path,
            PathBuf::from("database/migrations/2023_01_02_030405_create_posts_table.php")
        );
    }

    #[test]
    fn test_migration_without_soft_delete() {
        let files = MigrationGenerator::new(renderer())
            .generate(&request("title:string", OptionFlags::default()))
            .unwrap();
        assert!(!files[0].content.contains("softDeletes"));
        assert!(files[0].path.starts_with("database/migrations"));
    }

    #[test]
    fn test_routes_append() {
        let files = RoutesGenerator::new(renderer())
            .generate(&request("", OptionFlags::default()))
            .unwrap();
        assert_eq!(files[0].path, PathBuf::from("routes/api.php"));
        assert_eq!(
            files[0].content,
            "Route::apiResource('/posts', \\App\\Http\\Controllers\\API\\PostController::class);\n"
        );
        assert!(matches!(files[0].mode, WriteMode::Append { .. }));
    }

    #[test]
    fn test_closure_generator() {
        let generator = |request: &GenerationRequest| -> Result<Vec<GeneratedFile>> {
            Ok(vec![GeneratedFile::create(
                ArtifactKind::Model,
                format!("{}.txt", request.model()),
                "x",
            )])
        };
        let files = generator
            .generate(&request("", OptionFlags::default()))
            .unwrap();
        assert_eq!(files[0].path, PathBuf::from("Post.txt"));
    }

    #[test]
    fn test_class_generator_rejects_non_class_kind() {
        let generator = ClassGenerator::new(ArtifactKind::Routes, "routes", renderer());
        assert!(generator
            .generate(&request("", OptionFlags::default()))
            .is_err());
    }
}
