//! Board aggregation.
//!
//! Merges the three sources into one snapshot: the sprint status table is
//! authoritative for displayed status, the planning documents supply titles,
//! and per-story files contribute their own title, status, and checklist
//! counts. Story files absent from the table are folded in on a second pass.
//! The build is a pure function of filesystem state and never fails; problems
//! degrade to defaults plus a warning string on the snapshot.

use chrono::Utc;
use glob::glob;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::LazyLock;

use crate::config::{ArtifactPaths, BoardConfig, SPRINT_STATUS_FILE};

use super::model::{BoardSnapshot, EpicSummary, StoryEntry};
use super::sprint::parse_sprint_status;
use super::status::{STORY_STATUSES, Status};
use super::story::parse_story_file;
use super::titles::{TitleIndex, parse_titles};

static EPIC_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^epic-(\d+)$").unwrap());

static STORY_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)-(\d+)-([a-z0-9-]+)$").unwrap());

/// An epic before progress is computed over its stories.
struct EpicSeed {
    key: String,
    number: u32,
    title: String,
    status: Status,
}

/// Rebuild the board from the artifact tree at `output_dir`.
pub fn build_board(config: &BoardConfig, output_dir: &Path) -> BoardSnapshot {
    let paths = ArtifactPaths::new(output_dir);

    let statuses = parse_sprint_status(&paths.sprint_status_file);
    let titles = parse_titles(&[
        paths.visualization_file.clone(),
        paths.epics_file.clone(),
    ]);

    let mut warnings = Vec::new();
    if !output_dir.exists() {
        warnings.push(format!(
            "Output path does not exist: {}",
            output_dir.display()
        ));
    }
    if !paths.sprint_status_file.exists() {
        warnings.push(format!(
            "{} not found: {}",
            SPRINT_STATUS_FILE,
            paths.sprint_status_file.display()
        ));
    }
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let mut epic_seeds: BTreeMap<u32, EpicSeed> = BTreeMap::new();
    let mut stories: Vec<StoryEntry> = Vec::new();
    let mut story_keys_in_sprint: HashSet<String> = HashSet::new();

    // Table pass, keys in sorted order. Rebuilds of an unchanged tree
    // must be identical.
    let mut keys: Vec<&String> = statuses.keys().collect();
    keys.sort();

    for key in keys {
        let value = &statuses[key];

        if let Some(caps) = EPIC_KEY_RE.captures(key) {
            let Ok(number) = caps[1].parse::<u32>() else {
                continue;
            };
            epic_seeds.insert(
                number,
                EpicSeed {
                    key: key.clone(),
                    number,
                    title: epic_title(&titles, number),
                    status: Status::normalize(Some(value.as_str()), Status::Backlog),
                },
            );
            continue;
        }

        let Some(caps) = STORY_KEY_RE.captures(key) else {
            continue;
        };
        let (Ok(epic_number), Ok(story_number)) =
            (caps[1].parse::<u32>(), caps[2].parse::<u32>())
        else {
            continue;
        };

        let story_file = paths.implementation_dir.join(format!("{}.md", key));
        let parsed = parse_story_file(&story_file);

        let sprint_status = Status::normalize(Some(value.as_str()), Status::Backlog);
        let status_mismatch = parsed
            .status
            .is_some_and(|file_status| file_status != sprint_status);

        story_keys_in_sprint.insert(key.clone());

        stories.push(StoryEntry {
            key: key.clone(),
            epic_number,
            story_number,
            display_number: format!("{}.{}", epic_number, story_number),
            title: story_title(&titles, epic_number, story_number, parsed.title.as_deref(), key),
            status: sprint_status,
            status_from_sprint: Some(sprint_status),
            status_from_file: parsed.status,
            status_mismatch,
            file_path: story_file.display().to_string(),
            file_exists: story_file.exists(),
            updated_at: parsed.updated_at,
            checklist_done: parsed.checklist_done,
            checklist_total: parsed.checklist_total,
        });
    }

    // File pass: story files present on disk but missing from the table.
    // Their own declared status becomes the effective one, and there is
    // nothing to disagree with.
    if paths.implementation_dir.exists() {
        let pattern = paths
            .implementation_dir
            .join("*.md")
            .to_string_lossy()
            .to_string();
        let story_files: Vec<_> = glob(&pattern)
            .map(|entries| entries.filter_map(|entry| entry.ok()).collect())
            .unwrap_or_default();
        for file_path in story_files {
            let Some(stem) = file_path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if story_keys_in_sprint.contains(stem) {
                continue;
            }
            let Some(caps) = STORY_KEY_RE.captures(stem) else {
                continue;
            };
            let (Ok(epic_number), Ok(story_number)) =
                (caps[1].parse::<u32>(), caps[2].parse::<u32>())
            else {
                continue;
            };

            let parsed = parse_story_file(&file_path);

            stories.push(StoryEntry {
                key: stem.to_string(),
                epic_number,
                story_number,
                display_number: format!("{}.{}", epic_number, story_number),
                title: story_title(
                    &titles,
                    epic_number,
                    story_number,
                    parsed.title.as_deref(),
                    stem,
                ),
                status: parsed.status.unwrap_or(Status::Backlog),
                status_from_sprint: None,
                status_from_file: parsed.status,
                status_mismatch: false,
                file_path: file_path.display().to_string(),
                file_exists: true,
                updated_at: parsed.updated_at,
                checklist_done: parsed.checklist_done,
                checklist_total: parsed.checklist_total,
            });
        }
    }

    // Any epic referenced only by stories gets a synthesized record.
    for story in &stories {
        let number = story.epic_number;
        epic_seeds.entry(number).or_insert_with(|| EpicSeed {
            key: format!("epic-{}", number),
            number,
            title: epic_title(&titles, number),
            status: Status::Backlog,
        });
    }

    stories.sort_by_key(|s| (s.epic_number, s.story_number));

    let epics: Vec<EpicSummary> = epic_seeds
        .into_values()
        .map(|seed| summarize_epic(seed, &stories))
        .collect();

    let mut stories_by_status: BTreeMap<Status, usize> =
        STORY_STATUSES.iter().map(|s| (*s, 0)).collect();
    for story in &stories {
        *stories_by_status.entry(story.status).or_insert(0) += 1;
    }

    let status_mismatch_count = stories.iter().filter(|s| s.status_mismatch).count();
    let missing_file_count = stories.iter().filter(|s| !s.file_exists).count();

    tracing::debug!(
        stories = stories.len(),
        epics = epics.len(),
        mismatches = status_mismatch_count,
        "board snapshot built"
    );

    BoardSnapshot {
        generated_at: Utc::now(),
        workspace_root: config.workspace_root.display().to_string(),
        bmad_root: config.bmad_root.display().to_string(),
        bmad_output: output_dir.display().to_string(),
        sprint_status_file: paths.sprint_status_file.display().to_string(),
        story_count: stories.len(),
        epic_count: epics.len(),
        stories_by_status,
        status_mismatch_count,
        missing_file_count,
        warnings,
        epics,
        stories,
    }
}

fn epic_title(titles: &TitleIndex, number: u32) -> String {
    titles
        .epics
        .get(&number)
        .cloned()
        .unwrap_or_else(|| format!("Epic {}", number))
}

/// Title precedence: planning document, then the story file's own heading,
/// then a slug-derived fallback.
fn story_title(
    titles: &TitleIndex,
    epic_number: u32,
    story_number: u32,
    file_title: Option<&str>,
    key: &str,
) -> String {
    titles
        .stories
        .get(&format!("{}-{}", epic_number, story_number))
        .cloned()
        .or_else(|| file_title.map(str::to_string))
        .unwrap_or_else(|| title_from_story_key(key))
}

/// `"1-2-wire-codec"` becomes `"Wire Codec"`.
fn title_from_story_key(key: &str) -> String {
    let Some(caps) = STORY_KEY_RE.captures(key) else {
        return key.to_string();
    };
    caps[3]
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn summarize_epic(seed: EpicSeed, stories: &[StoryEntry]) -> EpicSummary {
    let epic_stories: Vec<&StoryEntry> = stories
        .iter()
        .filter(|s| s.epic_number == seed.number)
        .collect();

    let story_total = epic_stories.len();
    let story_done = epic_stories
        .iter()
        .filter(|s| s.status == Status::Done)
        .count();
    let story_in_progress = epic_stories
        .iter()
        .filter(|s| s.status == Status::InProgress)
        .count();
    let story_review = epic_stories
        .iter()
        .filter(|s| s.status == Status::Review)
        .count();
    let story_backlog = epic_stories
        .iter()
        .filter(|s| matches!(s.status, Status::Backlog | Status::ReadyForDev))
        .count();

    let progress_percent = if story_total > 0 {
        (story_done * 100 / story_total) as u32
    } else {
        0
    };

    EpicSummary {
        key: seed.key,
        number: seed.number,
        title: seed.title,
        status: seed.status,
        story_total,
        story_done,
        story_in_progress,
        story_review,
        story_backlog,
        progress_percent,
    }
}
