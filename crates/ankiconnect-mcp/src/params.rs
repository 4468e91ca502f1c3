//! Parameter types for the AnkiConnect tool catalogue.
//!
//! Each struct is one tool's argument contract, three ways at once: the
//! `JsonSchema` derive publishes the input schema, `Deserialize` validates
//! caller arguments against it, and `Serialize` produces the exact `params`
//! object the remote action expects. Field keys therefore match the
//! AnkiConnect vocabulary bit for bit — including its irregular spellings
//! (`startID`, `tag_to_replace`, `warning_check`, `Name`/`Front`/`Back`).

use std::collections::HashMap;

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Shared shapes
// ============================================================================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CardsParams {
    /// Card IDs to operate on
    pub cards: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CardParams {
    /// A single card ID
    pub card: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct NotesParams {
    /// Note IDs to operate on
    pub notes: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct NoteParams {
    /// A single note ID
    pub note: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct QueryParams {
    /// Anki search query (e.g., "deck:Japanese is:due")
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DeckParams {
    /// Deck name
    pub deck: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelNameParams {
    /// Model (note type) name
    pub model_name: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FilenameParams {
    /// Name of the file inside Anki's media folder
    pub filename: String,
}

// ============================================================================
// Cards
// ============================================================================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetEaseFactorsParams {
    /// Card IDs to set ease for
    pub cards: Vec<i64>,
    /// Ease factors as integers, one per card (e.g., 2500 = 250%)
    pub ease_factors: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SetSpecificValueOfCardParams {
    /// Card ID to modify
    pub card: i64,
    /// Card property names to set (e.g., "flags", "odue")
    pub keys: Vec<String>,
    /// New values, one per key
    #[serde(rename = "newValues")]
    pub new_values: Vec<String>,
    /// Must be true to change properties that can corrupt the database
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_check: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetIntervalsParams {
    /// Card IDs to query
    pub cards: Vec<i64>,
    /// If true, return the full interval history instead of the latest interval
    #[serde(default)]
    pub complete: bool,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardAnswerInput {
    /// Card ID to answer
    pub card_id: i64,
    /// Ease button to press: 1 (Again), 2 (Hard), 3 (Good), 4 (Easy)
    pub ease: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AnswerCardsParams {
    /// Answers to apply
    pub answers: Vec<CardAnswerInput>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SetDueDateParams {
    /// Card IDs to set due date for
    pub cards: Vec<i64>,
    /// Days specification: "0" (today), "1" (tomorrow), "-1" (yesterday), "1-7" (random range), "0!" (today and reset interval)
    pub days: String,
}

// ============================================================================
// Decks
// ============================================================================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ChangeDeckParams {
    /// Card IDs to move
    pub cards: Vec<i64>,
    /// Destination deck name (created if it does not exist)
    pub deck: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDecksParams {
    /// Deck names to delete
    pub decks: Vec<String>,
    /// Must be true; the cards in the decks are deleted with them
    pub cards_too: bool,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SaveDeckConfigParams {
    /// Complete deck configuration object, as returned by getDeckConfig
    pub config: Value,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetDeckConfigIdParams {
    /// Deck names to change the configuration of
    pub decks: Vec<String>,
    /// Configuration group ID to apply
    pub config_id: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloneDeckConfigIdParams {
    /// Name for the new configuration group
    pub name: String,
    /// Configuration group ID to clone from (defaults to the Default group)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clone_from: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveDeckConfigIdParams {
    /// Configuration group ID to remove
    pub config_id: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetDeckStatsParams {
    /// Deck names to get statistics for
    pub decks: Vec<String>,
}

// ============================================================================
// GUI
// ============================================================================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReorderCardsInput {
    /// Sort order: "ascending" or "descending"
    pub order: String,
    /// Column to sort by (e.g., "noteCrt")
    pub column_id: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuiBrowseParams {
    /// Anki search query to open the browser with
    pub query: String,
    /// Optional ordering applied to the browser columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reorder_cards: Option<ReorderCardsInput>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GuiDeckParams {
    /// Deck name
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GuiAnswerCardParams {
    /// Ease button to press: 1 (Again), 2 (Hard), 3 (Good), 4 (Easy)
    pub ease: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GuiImportFileParams {
    /// Path to the file to import; omit to open the file picker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

// ============================================================================
// Media
// ============================================================================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreMediaFileParams {
    /// Filename to store the media under
    pub filename: String,
    /// Base64-encoded file contents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Absolute path to a local file to copy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// URL to download the file from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// If false, a unique filename is generated instead of overwriting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_existing: Option<bool>,
}

fn default_media_pattern() -> String {
    "*".to_string()
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetMediaFilesNamesParams {
    /// Glob pattern to match filenames against (e.g., "*.mp3")
    #[serde(default = "default_media_pattern")]
    pub pattern: String,
}

// ============================================================================
// Miscellaneous
// ============================================================================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ApiReflectParams {
    /// What to reflect over; currently only "actions" is supported
    pub scopes: Vec<String>,
    /// Action names to filter by; null means all actions
    #[serde(default)]
    pub actions: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MultiActionInput {
    /// Action name to invoke
    pub action: String,
    /// Parameters for the action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Protocol version override for this action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MultiParams {
    /// Actions to perform in one batch
    pub actions: Vec<MultiActionInput>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LoadProfileParams {
    /// Profile name to switch to
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportPackageParams {
    /// Deck name to export
    pub deck: String,
    /// Path to write the .apkg file to
    pub path: String,
    /// Include scheduling data in the export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_sched: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ImportPackageParams {
    /// Path to the .apkg file to import
    pub path: String,
}

// ============================================================================
// Models
// ============================================================================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindModelsByIdParams {
    /// Model IDs to look up
    pub model_ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindModelsByNameParams {
    /// Model names to look up
    pub model_names: Vec<String>,
}

/// A card template for createModel. The template name is optional and
/// defaults to "Card N".
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CardTemplateInput {
    /// Template name
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Front template HTML
    #[serde(rename = "Front")]
    pub front: String,
    /// Back template HTML
    #[serde(rename = "Back")]
    pub back: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateModelParams {
    /// Name for the new model
    pub model_name: String,
    /// Field names, in display order
    pub in_order_fields: Vec<String>,
    /// CSS shared by all templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    /// Create a cloze model instead of a standard one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_cloze: Option<bool>,
    /// Card templates
    pub card_templates: Vec<CardTemplateInput>,
}

/// Front/back content for one template of an existing model. Either side
/// may be omitted to leave it unchanged.
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TemplateSidesInput {
    /// Front template HTML
    #[serde(rename = "Front", default, skip_serializing_if = "Option::is_none")]
    pub front: Option<String>,
    /// Back template HTML
    #[serde(rename = "Back", default, skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ModelTemplatesInput {
    /// Model name to update
    pub name: String,
    /// Template contents keyed by template name
    pub templates: HashMap<String, TemplateSidesInput>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateModelTemplatesParams {
    /// Model and templates to update
    pub model: ModelTemplatesInput,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ModelStylingInput {
    /// Model name to update
    pub name: String,
    /// New CSS for the model
    pub css: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateModelStylingParams {
    /// Model and styling to update
    pub model: ModelStylingInput,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FindReplaceInput {
    /// Model to search in; an empty string searches all models
    pub model_name: String,
    /// Text to find
    pub find_text: String,
    /// Replacement text
    pub replace_text: String,
    /// Search front templates
    pub front: bool,
    /// Search back templates
    pub back: bool,
    /// Search the CSS
    pub css: bool,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FindAndReplaceInModelsParams {
    /// Find/replace specification
    pub model: FindReplaceInput,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelTemplateRenameParams {
    /// Model the template belongs to
    pub model_name: String,
    /// Current template name
    pub old_template_name: String,
    /// New template name
    pub new_template_name: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelTemplateRepositionParams {
    /// Model the template belongs to
    pub model_name: String,
    /// Template to move
    pub template_name: String,
    /// New position (0-based)
    pub index: i32,
}

/// A card template for modelTemplateAdd. Unlike createModel, the name is
/// required here.
#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct NamedTemplateInput {
    /// Template name
    #[serde(rename = "Name")]
    pub name: String,
    /// Front template HTML
    #[serde(rename = "Front")]
    pub front: String,
    /// Back template HTML
    #[serde(rename = "Back")]
    pub back: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelTemplateAddParams {
    /// Model to add the template to
    pub model_name: String,
    /// Template to add
    pub template: NamedTemplateInput,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelTemplateRemoveParams {
    /// Model the template belongs to
    pub model_name: String,
    /// Template to remove
    pub template_name: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelFieldRenameParams {
    /// Model the field belongs to
    pub model_name: String,
    /// Current field name
    pub old_field_name: String,
    /// New field name
    pub new_field_name: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelFieldRepositionParams {
    /// Model the field belongs to
    pub model_name: String,
    /// Field to move
    pub field_name: String,
    /// New position (0-based)
    pub index: i32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelFieldAddParams {
    /// Model to add the field to
    pub model_name: String,
    /// Name of the new field
    pub field_name: String,
    /// Position to insert at; defaults to the end
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelFieldRemoveParams {
    /// Model the field belongs to
    pub model_name: String,
    /// Field to remove
    pub field_name: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelFieldSetFontParams {
    /// Model the field belongs to
    pub model_name: String,
    /// Field to change
    pub field_name: String,
    /// Font name (e.g., "Courier")
    pub font: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelFieldSetFontSizeParams {
    /// Model the field belongs to
    pub model_name: String,
    /// Field to change
    pub field_name: String,
    /// Font size in points
    pub font_size: i32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelFieldSetDescriptionParams {
    /// Model the field belongs to
    pub model_name: String,
    /// Field to change
    pub field_name: String,
    /// New field description (shown as a hint in the editor)
    pub description: String,
}

// ============================================================================
// Notes
// ============================================================================

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateScopeOptionsInput {
    /// Deck to restrict the duplicate check to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_name: Option<String>,
    /// Also check child decks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_children: Option<bool>,
    /// Check across all note types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_all_models: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptionsInput {
    /// Allow adding a duplicate of an existing note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_duplicate: Option<bool>,
    /// Scope of the duplicate check: "deck" or "collection"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_scope: Option<String>,
    /// Fine-grained duplicate check settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_scope_options: Option<DuplicateScopeOptionsInput>,
    /// Close the Add Cards dialog after adding (guiAddCards only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_after_adding: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaAttachmentInput {
    /// URL to download the file from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Base64-encoded file contents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Absolute path to a local file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Filename to store the media under
    pub filename: String,
    /// Note fields to reference the file from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
    /// Skip the file if its SHA1 matches this checksum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_hash: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteInput {
    /// Deck to add the note to
    pub deck_name: String,
    /// Model (note type) name
    pub model_name: String,
    /// Field values (field name -> value)
    pub fields: HashMap<String, String>,
    /// Tags to apply
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Duplicate handling options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<NoteOptionsInput>,
    /// Audio files to attach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Vec<MediaAttachmentInput>>,
    /// Video files to attach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Vec<MediaAttachmentInput>>,
    /// Pictures to attach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<Vec<MediaAttachmentInput>>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AddNoteParams {
    /// The note to add
    pub note: NoteInput,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct NotesInputParams {
    /// Notes to process
    pub notes: Vec<NoteInput>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateNoteFieldsInput {
    /// Note ID to update
    pub id: i64,
    /// Field values to set (field name -> value)
    pub fields: HashMap<String, String>,
    /// Audio files to attach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Vec<MediaAttachmentInput>>,
    /// Video files to attach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Vec<MediaAttachmentInput>>,
    /// Pictures to attach
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<Vec<MediaAttachmentInput>>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateNoteFieldsParams {
    /// Note and fields to update
    pub note: UpdateNoteFieldsInput,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateNoteInput {
    /// Note ID to update
    pub id: i64,
    /// Field values to set; omit to leave fields unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<HashMap<String, String>>,
    /// Tags to set, replacing the existing tags; omit to leave tags unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateNoteParams {
    /// Note update; at least one of fields or tags must be given
    pub note: UpdateNoteInput,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteModelInput {
    /// Note ID to update
    pub id: i64,
    /// Model to change the note to
    pub model_name: String,
    /// Field values for the new model (field name -> value)
    pub fields: HashMap<String, String>,
    /// Tags to set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateNoteModelParams {
    /// Note, model, and fields to update
    pub note: UpdateNoteModelInput,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateNoteTagsParams {
    /// Note ID to update
    pub note: i64,
    /// Tags to set, replacing the existing tags
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct NoteTagsParams {
    /// Note IDs to modify
    pub notes: Vec<i64>,
    /// Tags as a space-separated string (e.g., "tag1 tag2")
    pub tags: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ReplaceTagsParams {
    /// Note IDs to modify
    pub notes: Vec<i64>,
    /// Tag to replace
    pub tag_to_replace: String,
    /// Replacement tag
    pub replace_with_tag: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ReplaceTagsInAllNotesParams {
    /// Tag to replace
    pub tag_to_replace: String,
    /// Replacement tag
    pub replace_with_tag: String,
}

// ============================================================================
// Statistics
// ============================================================================

fn default_whole_collection() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCollectionStatsHtmlParams {
    /// Report on the whole collection instead of the current deck
    #[serde(default = "default_whole_collection")]
    pub whole_collection: bool,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CardReviewsParams {
    /// Deck name to get reviews for
    pub deck: String,
    /// Only return reviews with an ID (unix time in ms) greater than this
    #[serde(rename = "startID")]
    pub start_id: i64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetLatestReviewIdParams {
    /// Deck name to query
    pub deck: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct InsertReviewsParams {
    /// Reviews as 9-tuples of (reviewTime, cardID, usn, buttonPressed,
    /// newInterval, previousInterval, newFactor, reviewDuration, reviewType)
    pub reviews: Vec<Vec<i64>>,
}
