// Persistence-layer code generation
// One generator per artifact kind, driven by CodeGenerator

pub mod data_generator;
pub mod entity_generator;
pub mod extension_generator;
pub mod interface_generator;
pub mod metamodel_generator;
pub mod orders_predicates_generator;
pub mod utils;

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::config::GenerationOptions;
use crate::ent_framework::{Entity, EntitySet};
use crate::error::{CodegenError, CodegenResult};
use utils::Language;

/// Artifact families, in the order they are produced for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Interface,
    Data,
    Metamodel,
    Entity,
    OrdersPredicates,
    Extension,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 6] = [
        ArtifactKind::Interface,
        ArtifactKind::Data,
        ArtifactKind::Metamodel,
        ArtifactKind::Entity,
        ArtifactKind::OrdersPredicates,
        ArtifactKind::Extension,
    ];

    /// Kinds produced when only data types are requested.
    pub const DATA_ONLY: [ArtifactKind; 2] = [ArtifactKind::Interface, ArtifactKind::Data];

    pub fn language(self) -> Language {
        match self {
            ArtifactKind::Metamodel => Language::Java,
            _ => Language::Kotlin,
        }
    }

    pub fn file_name(self, entity: &Entity) -> String {
        let name = utils::capitalized(&entity.name);
        let stem = match self {
            ArtifactKind::Interface => format!("I{name}"),
            ArtifactKind::Data => format!("{name}Data"),
            ArtifactKind::Metamodel => format!("{name}Entity_"),
            ArtifactKind::Entity => format!("{name}Entity"),
            ArtifactKind::OrdersPredicates => format!("{name}OrdersPredicates"),
            ArtifactKind::Extension => format!("{name}Extension"),
        };
        format!("{stem}.{}", self.language().extension())
    }

    /// Location of the artifact relative to the output directory.
    pub fn relative_path(self, entity: &Entity) -> PathBuf {
        utils::package_dir(&entity.package_name).join(self.file_name(entity))
    }
}

/// Rendered artifact, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub entity: String,
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub contents: String,
}

/// Main code generator orchestrator
pub struct CodeGenerator {
    entities: EntitySet,
    options: GenerationOptions,
}

impl CodeGenerator {
    pub fn new(entities: EntitySet, options: GenerationOptions) -> Self {
        Self { entities, options }
    }

    pub fn entities(&self) -> &EntitySet {
        &self.entities
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Render a single artifact for `entity`.
    pub fn render(&self, entity: &Entity, kind: ArtifactKind) -> CodegenResult<GeneratedFile> {
        let entities = &self.entities;
        let contents = match kind {
            ArtifactKind::Interface => {
                interface_generator::InterfaceGenerator::new(entities, &self.options).generate(entity)?
            }
            ArtifactKind::Data => data_generator::DataGenerator::new(entities, &self.options).generate(entity)?,
            ArtifactKind::Metamodel => metamodel_generator::MetamodelGenerator::new(entities).generate(entity)?,
            ArtifactKind::Entity => entity_generator::EntityGenerator::new(entities).generate(entity)?,
            ArtifactKind::OrdersPredicates => {
                orders_predicates_generator::OrdersPredicatesGenerator::new(entities).generate(entity)?
            }
            ArtifactKind::Extension => extension_generator::ExtensionGenerator::new(entities).generate(entity)?,
        };

        Ok(GeneratedFile {
            entity: entity.name.clone(),
            kind,
            path: kind.relative_path(entity),
            contents,
        })
    }

    /// Artifact kinds this run produces for every entity.
    pub fn artifact_kinds(&self) -> &'static [ArtifactKind] {
        if self.options.generate_only_data {
            &ArtifactKind::DATA_ONLY
        } else {
            &ArtifactKind::ALL
        }
    }

    /// Render every artifact of one entity. Nothing is returned unless all
    /// of them render.
    pub fn render_entity(&self, entity: &Entity) -> CodegenResult<Vec<GeneratedFile>> {
        let kinds = self.artifact_kinds();
        if self.options.generate_only_data {
            warn!(
                entity = %entity.name,
                "data-only mode: skipping metamodel, entity, orders/predicates and extension artifacts"
            );
        }
        kinds.iter().map(|kind| self.render(entity, *kind)).collect()
    }

    /// Render the whole run in memory, in declaration order.
    pub fn render_all(&self) -> CodegenResult<Vec<GeneratedFile>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();
        for entity in &self.entities {
            for file in self.render_entity(entity)? {
                check_collision(&mut seen, &file.path)?;
                files.push(file);
            }
        }
        Ok(files)
    }

    /// Generate and write all artifacts below `output_directory`.
    ///
    /// Each entity is rendered completely and its files are staged before
    /// any of them replaces a destination. The first failure aborts the run
    /// and rolls back that entity's artifacts. Earlier entities stay written.
    pub fn generate_all(&self, output_directory: &Path) -> CodegenResult<Vec<PathBuf>> {
        info!(
            entities = self.entities.len(),
            output = %output_directory.display(),
            "starting code generation"
        );

        let mut seen = HashSet::new();
        let mut written = Vec::new();
        for entity in &self.entities {
            debug!(entity = %entity.name, package = %entity.package_name, "rendering entity");
            let files = self.render_entity(entity)?;
            for file in &files {
                check_collision(&mut seen, &file.path)?;
            }
            written.extend(write_entity(output_directory, &files)?);
        }

        info!(files = written.len(), "code generation completed");
        Ok(written)
    }
}

fn check_collision(seen: &mut HashSet<PathBuf>, path: &Path) -> CodegenResult<()> {
    if seen.insert(path.to_path_buf()) {
        Ok(())
    } else {
        Err(CodegenError::ArtifactCollision {
            path: path.to_path_buf(),
        })
    }
}

/// Artifact written to a temp file next to its destination, not yet visible.
struct StagedArtifact<'a> {
    file: &'a GeneratedFile,
    temp: NamedTempFile,
    destination: PathBuf,
}

/// Write all artifacts of one entity.
///
/// Every artifact is staged in a temp file first; only when all of them are
/// on disk are they persisted over their destinations. If a persist fails,
/// the artifacts already persisted for this entity are removed again, and
/// the remaining temp files are deleted on drop.
fn write_entity(output_directory: &Path, files: &[GeneratedFile]) -> CodegenResult<Vec<PathBuf>> {
    let staged = files
        .iter()
        .map(|file| stage_artifact(output_directory, file))
        .collect::<CodegenResult<Vec<_>>>()?;

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for StagedArtifact { file, temp, destination } in staged {
        if let Err(e) = temp.persist(&destination) {
            for path in &written {
                if let Err(remove) = fs::remove_file(path) {
                    warn!(path = %path.display(), error = %remove, "failed to roll back artifact");
                }
            }
            return Err(CodegenError::io(&destination, e.error));
        }
        debug!(entity = %file.entity, kind = ?file.kind, path = %destination.display(), "wrote artifact");
        written.push(destination);
    }
    Ok(written)
}

fn stage_artifact<'a>(output_directory: &Path, file: &'a GeneratedFile) -> CodegenResult<StagedArtifact<'a>> {
    let destination = output_directory.join(&file.path);
    let directory = destination
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| output_directory.to_path_buf());

    fs::create_dir_all(&directory).map_err(|e| CodegenError::io(&directory, e))?;

    let mut temp = NamedTempFile::new_in(&directory).map_err(|e| CodegenError::io(&directory, e))?;
    temp.write_all(file.contents.as_bytes())
        .map_err(|e| CodegenError::io(&destination, e))?;

    Ok(StagedArtifact { file, temp, destination })
}
