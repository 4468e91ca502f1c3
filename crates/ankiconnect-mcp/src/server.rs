//! The MCP server: one tool per AnkiConnect action.
//!
//! Every handler follows the same cycle — validate the typed parameters,
//! forward them to the invocation primitive, format the raw result. Tool
//! names and parameter keys are the AnkiConnect action vocabulary verbatim,
//! so the router doubles as the catalogue of what the endpoint understands.
//!
//! Formatting is declared per tool: structured results come back as
//! pretty-printed JSON blocks, mutations as a short status line.

use ankiconnect::AnkiConnectClient;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::params::*;

/// Render a raw result as a pretty-printed JSON text block.
fn json_text(result: &Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(result).unwrap(),
    )])
}

/// Render a status line.
fn text(message: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message.into())])
}

/// Map a client error onto the MCP error space.
fn mcp_error(err: ankiconnect::Error) -> McpError {
    match err {
        // The endpoint's own message reaches the caller verbatim.
        ankiconnect::Error::AnkiConnect(message) => McpError::internal_error(message, None),
        other => McpError::internal_error(other.to_string(), None),
    }
}

/// Count the `true` entries of a per-item boolean result array.
fn count_true(result: &Value) -> usize {
    result
        .as_array()
        .map(|items| items.iter().filter(|v| v.as_bool() == Some(true)).count())
        .unwrap_or(0)
}

/// MCP server exposing the AnkiConnect action catalogue.
#[derive(Clone)]
pub struct AnkiConnectServer {
    client: AnkiConnectClient,
    tool_router: ToolRouter<AnkiConnectServer>,
    read_only: bool,
}

impl AnkiConnectServer {
    pub fn new(client: AnkiConnectClient, read_only: bool) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
            read_only,
        }
    }

    /// Check if a write action is allowed.
    ///
    /// Returns an error if the server is in read-only mode.
    fn check_write(&self, action: &str) -> Result<(), McpError> {
        if self.read_only {
            warn!("Blocked write action in read-only mode: {}", action);
            Err(McpError::invalid_request(
                format!("Write action '{}' is not allowed in read-only mode", action),
                None,
            ))
        } else {
            Ok(())
        }
    }

    /// Forward an action to the endpoint and return its raw result.
    async fn invoke<P: Serialize>(&self, action: &str, params: &P) -> Result<Value, McpError> {
        self.client.invoke(action, params).await.map_err(mcp_error)
    }

    /// Forward a parameterless action to the endpoint.
    async fn invoke_without_params(&self, action: &str) -> Result<Value, McpError> {
        self.client
            .invoke_without_params(action)
            .await
            .map_err(mcp_error)
    }

    /// Invoke and render the result as a JSON text block.
    async fn forward_json<P: Serialize>(
        &self,
        action: &str,
        params: &P,
    ) -> Result<CallToolResult, McpError> {
        let result = self.invoke(action, params).await?;
        Ok(json_text(&result))
    }

    /// Invoke a parameterless action and render the result as JSON.
    async fn forward_json_without_params(
        &self,
        action: &str,
    ) -> Result<CallToolResult, McpError> {
        let result = self.invoke_without_params(action).await?;
        Ok(json_text(&result))
    }
}

#[tool_router]
impl AnkiConnectServer {
    // ========================================================================
    // Card actions
    // ========================================================================

    #[tool(
        name = "getEaseFactors",
        description = "Get the ease factor for each of the given cards (e.g., 2500 = 250%)."
    )]
    async fn get_ease_factors(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("getEaseFactors", &params).await
    }

    #[tool(
        name = "setEaseFactors",
        description = "Set the ease factor for each of the given cards. Takes one ease factor per card."
    )]
    async fn set_ease_factors(
        &self,
        Parameters(params): Parameters<SetEaseFactorsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("setEaseFactors")?;
        if params.cards.len() != params.ease_factors.len() {
            return Err(McpError::invalid_params(
                format!(
                    "easeFactors must have the same length as cards (got {}, expected {})",
                    params.ease_factors.len(),
                    params.cards.len()
                ),
                None,
            ));
        }

        let result = self.invoke("setEaseFactors", &params).await?;
        let succeeded = count_true(&result);
        info!(succeeded, "Ease factors set");
        Ok(text(format!(
            "Set ease factors for {} of {} cards",
            succeeded,
            params.cards.len()
        )))
    }

    #[tool(
        name = "setSpecificValueOfCard",
        description = "Set specific properties of a single card. Takes one new value per key. Changing values that can corrupt the database also requires warning_check=true."
    )]
    async fn set_specific_value_of_card(
        &self,
        Parameters(params): Parameters<SetSpecificValueOfCardParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("setSpecificValueOfCard")?;
        if params.keys.len() != params.new_values.len() {
            return Err(McpError::invalid_params(
                format!(
                    "newValues must have the same length as keys (got {}, expected {})",
                    params.new_values.len(),
                    params.keys.len()
                ),
                None,
            ));
        }

        let result = self.invoke("setSpecificValueOfCard", &params).await?;
        let succeeded = count_true(&result);
        Ok(text(format!(
            "Set {} of {} values on card {}",
            succeeded,
            params.keys.len(),
            params.card
        )))
    }

    #[tool(
        name = "suspend",
        description = "Suspend cards so they no longer come up for review."
    )]
    async fn suspend(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("suspend")?;
        let result = self.invoke("suspend", &params).await?;
        if result.as_bool() == Some(true) {
            info!(count = params.cards.len(), "Cards suspended");
            Ok(text(format!("Suspended {} cards", params.cards.len())))
        } else {
            Ok(text(
                "No cards were suspended (already suspended or not found)",
            ))
        }
    }

    #[tool(name = "unsuspend", description = "Unsuspend previously suspended cards.")]
    async fn unsuspend(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("unsuspend")?;
        let result = self.invoke("unsuspend", &params).await?;
        if result.as_bool() == Some(true) {
            info!(count = params.cards.len(), "Cards unsuspended");
            Ok(text(format!("Unsuspended {} cards", params.cards.len())))
        } else {
            Ok(text(
                "No cards were unsuspended (not suspended or not found)",
            ))
        }
    }

    #[tool(name = "suspended", description = "Check whether a single card is suspended.")]
    async fn suspended(
        &self,
        Parameters(params): Parameters<CardParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.invoke("suspended", &params).await?;
        if result.as_bool() == Some(true) {
            Ok(text(format!("Card {} is suspended", params.card)))
        } else {
            Ok(text(format!("Card {} is not suspended", params.card)))
        }
    }

    #[tool(
        name = "areSuspended",
        description = "Check whether each of the given cards is suspended. Returns null for cards that do not exist."
    )]
    async fn are_suspended(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("areSuspended", &params).await
    }

    #[tool(
        name = "areDue",
        description = "Check whether each of the given cards is due for review."
    )]
    async fn are_due(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("areDue", &params).await
    }

    #[tool(
        name = "getIntervals",
        description = "Get the review interval for each of the given cards, in days (negative numbers are seconds). Pass complete=true for the full interval history."
    )]
    async fn get_intervals(
        &self,
        Parameters(params): Parameters<GetIntervalsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("getIntervals", &params).await
    }

    #[tool(
        name = "findCards",
        description = "Find cards using Anki search syntax (e.g., 'deck:Japanese is:due'). Returns card IDs."
    )]
    async fn find_cards(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("findCards", &params).await
    }

    #[tool(
        name = "cardsToNotes",
        description = "Convert card IDs to the IDs of the notes they were generated from."
    )]
    async fn cards_to_notes(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("cardsToNotes", &params).await
    }

    #[tool(
        name = "cardsModTime",
        description = "Get the modification time for each of the given cards."
    )]
    async fn cards_mod_time(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("cardsModTime", &params).await
    }

    #[tool(
        name = "cardsInfo",
        description = "Get detailed information about cards including fields, deck, ease factor, interval, reps, and lapses."
    )]
    async fn cards_info(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("cardsInfo", &params).await
    }

    #[tool(
        name = "forgetCards",
        description = "Forget cards, resetting them to the new state and clearing all learning progress."
    )]
    async fn forget_cards(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("forgetCards")?;
        self.invoke("forgetCards", &params).await?;
        info!(count = params.cards.len(), "Cards reset to new");
        Ok(text(format!(
            "Reset {} cards to new state",
            params.cards.len()
        )))
    }

    #[tool(
        name = "relearnCards",
        description = "Make cards relearning, putting them back into the learning queue."
    )]
    async fn relearn_cards(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("relearnCards")?;
        self.invoke("relearnCards", &params).await?;
        info!(count = params.cards.len(), "Cards set to relearning");
        Ok(text(format!(
            "Moved {} cards back into learning",
            params.cards.len()
        )))
    }

    #[tool(
        name = "answerCards",
        description = "Answer cards programmatically. Ease is 1 (Again) through 4 (Easy). The card must be in the review queue."
    )]
    async fn answer_cards(
        &self,
        Parameters(params): Parameters<AnswerCardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("answerCards")?;
        let result = self.invoke("answerCards", &params).await?;
        let succeeded = count_true(&result);
        info!(succeeded, "Cards answered");
        Ok(text(format!(
            "Answered {} of {} cards",
            succeeded,
            params.answers.len()
        )))
    }

    #[tool(
        name = "setDueDate",
        description = "Set the due date of cards. Days can be '0' (today), '1' (tomorrow), '-1' (yesterday), '1-7' (random range), or '0!' (today and reset interval)."
    )]
    async fn set_due_date(
        &self,
        Parameters(params): Parameters<SetDueDateParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("setDueDate")?;
        let result = self.invoke("setDueDate", &params).await?;
        if result.as_bool() == Some(true) {
            info!(count = params.cards.len(), days = %params.days, "Due date set");
            Ok(text(format!(
                "Set due date to '{}' for {} cards",
                params.days,
                params.cards.len()
            )))
        } else {
            Ok(text("Failed to set due date"))
        }
    }

    // ========================================================================
    // Deck actions
    // ========================================================================

    #[tool(name = "deckNames", description = "Get the names of all decks.")]
    async fn deck_names(&self) -> Result<CallToolResult, McpError> {
        self.forward_json_without_params("deckNames").await
    }

    #[tool(
        name = "deckNamesAndIds",
        description = "Get the names of all decks together with their IDs."
    )]
    async fn deck_names_and_ids(&self) -> Result<CallToolResult, McpError> {
        self.forward_json_without_params("deckNamesAndIds").await
    }

    #[tool(
        name = "getDecks",
        description = "Group the given cards by the deck they belong to."
    )]
    async fn get_decks(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("getDecks", &params).await
    }

    #[tool(
        name = "createDeck",
        description = "Create a new empty deck. Returns the deck ID. Will not overwrite a deck that already exists."
    )]
    async fn create_deck(
        &self,
        Parameters(params): Parameters<DeckParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("createDeck")?;
        let result = self.invoke("createDeck", &params).await?;
        info!(deck = %params.deck, "Deck created");
        Ok(text(format!(
            "Created deck '{}' with ID: {}",
            params.deck, result
        )))
    }

    #[tool(
        name = "changeDeck",
        description = "Move cards to a different deck, creating it if it does not exist."
    )]
    async fn change_deck(
        &self,
        Parameters(params): Parameters<ChangeDeckParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("changeDeck")?;
        self.invoke("changeDeck", &params).await?;
        info!(count = params.cards.len(), deck = %params.deck, "Cards moved");
        Ok(text(format!(
            "Moved {} cards to deck '{}'",
            params.cards.len(),
            params.deck
        )))
    }

    #[tool(
        name = "deleteDecks",
        description = "Delete decks and the cards inside them. cardsToo must be true."
    )]
    async fn delete_decks(
        &self,
        Parameters(params): Parameters<DeleteDecksParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("deleteDecks")?;
        self.invoke("deleteDecks", &params).await?;
        info!(count = params.decks.len(), "Decks deleted");
        Ok(text(format!(
            "Deleted {} decks and their cards",
            params.decks.len()
        )))
    }

    #[tool(
        name = "getDeckConfig",
        description = "Get the configuration group of the given deck."
    )]
    async fn get_deck_config(
        &self,
        Parameters(params): Parameters<DeckParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("getDeckConfig", &params).await
    }

    #[tool(
        name = "saveDeckConfig",
        description = "Save a complete deck configuration group, as returned by getDeckConfig."
    )]
    async fn save_deck_config(
        &self,
        Parameters(params): Parameters<SaveDeckConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("saveDeckConfig")?;
        let result = self.invoke("saveDeckConfig", &params).await?;
        if result.as_bool() == Some(true) {
            Ok(text("Saved deck configuration"))
        } else {
            Ok(text("Failed to save deck configuration (unknown config ID)"))
        }
    }

    #[tool(
        name = "setDeckConfigId",
        description = "Apply a configuration group to the given decks."
    )]
    async fn set_deck_config_id(
        &self,
        Parameters(params): Parameters<SetDeckConfigIdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("setDeckConfigId")?;
        let result = self.invoke("setDeckConfigId", &params).await?;
        if result.as_bool() == Some(true) {
            Ok(text(format!(
                "Applied configuration {} to {} decks",
                params.config_id,
                params.decks.len()
            )))
        } else {
            Ok(text(
                "Failed to apply configuration (unknown deck or config ID)",
            ))
        }
    }

    #[tool(
        name = "cloneDeckConfigId",
        description = "Clone a deck configuration group under a new name. Returns the new configuration ID."
    )]
    async fn clone_deck_config_id(
        &self,
        Parameters(params): Parameters<CloneDeckConfigIdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("cloneDeckConfigId")?;
        let result = self.invoke("cloneDeckConfigId", &params).await?;
        match result.as_i64() {
            Some(id) => Ok(text(format!(
                "Cloned deck configuration as '{}' with ID: {}",
                params.name, id
            ))),
            None => Ok(text("Failed to clone deck configuration")),
        }
    }

    #[tool(
        name = "removeDeckConfigId",
        description = "Remove a deck configuration group."
    )]
    async fn remove_deck_config_id(
        &self,
        Parameters(params): Parameters<RemoveDeckConfigIdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("removeDeckConfigId")?;
        let result = self.invoke("removeDeckConfigId", &params).await?;
        if result.as_bool() == Some(true) {
            Ok(text(format!(
                "Removed deck configuration {}",
                params.config_id
            )))
        } else {
            Ok(text("No such deck configuration"))
        }
    }

    #[tool(
        name = "getDeckStats",
        description = "Get statistics (new/learn/review counts, total cards) for the given decks."
    )]
    async fn get_deck_stats(
        &self,
        Parameters(params): Parameters<GetDeckStatsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("getDeckStats", &params).await
    }

    // ========================================================================
    // GUI actions
    // ========================================================================

    #[tool(
        name = "guiBrowse",
        description = "Open the card browser with the given search query. Returns the IDs of the cards shown."
    )]
    async fn gui_browse(
        &self,
        Parameters(params): Parameters<GuiBrowseParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("guiBrowse", &params).await
    }

    #[tool(
        name = "guiSelectCard",
        description = "Select a card in the open card browser. The browser must already be open."
    )]
    async fn gui_select_card(
        &self,
        Parameters(params): Parameters<CardParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.invoke("guiSelectCard", &params).await?;
        if result.as_bool() == Some(true) {
            Ok(text(format!("Selected card {} in the browser", params.card)))
        } else {
            Ok(text("Card browser is not open"))
        }
    }

    #[tool(
        name = "guiSelectedNotes",
        description = "Get the IDs of the notes selected in the card browser."
    )]
    async fn gui_selected_notes(&self) -> Result<CallToolResult, McpError> {
        self.forward_json_without_params("guiSelectedNotes").await
    }

    #[tool(
        name = "guiAddCards",
        description = "Open the Add Cards dialog prefilled with the given note. Returns the ID the note would get."
    )]
    async fn gui_add_cards(
        &self,
        Parameters(params): Parameters<AddNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("guiAddCards")?;
        let result = self.invoke("guiAddCards", &params).await?;
        Ok(text(format!(
            "Opened the Add Cards dialog (note ID: {})",
            result
        )))
    }

    #[tool(
        name = "guiEditNote",
        description = "Open the Edit dialog for the note with the given ID."
    )]
    async fn gui_edit_note(
        &self,
        Parameters(params): Parameters<NoteParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("guiEditNote")?;
        self.invoke("guiEditNote", &params).await?;
        Ok(text(format!("Opened the Edit dialog for note {}", params.note)))
    }

    #[tool(
        name = "guiCurrentCard",
        description = "Get information about the card currently shown in review, or null when not reviewing."
    )]
    async fn gui_current_card(&self) -> Result<CallToolResult, McpError> {
        self.forward_json_without_params("guiCurrentCard").await
    }

    #[tool(
        name = "guiStartCardTimer",
        description = "Start or reset the timer for the current card."
    )]
    async fn gui_start_card_timer(&self) -> Result<CallToolResult, McpError> {
        self.check_write("guiStartCardTimer")?;
        let result = self.invoke_without_params("guiStartCardTimer").await?;
        if result.as_bool() == Some(true) {
            Ok(text("Started the card timer"))
        } else {
            Ok(text("Failed to start the card timer"))
        }
    }

    #[tool(
        name = "guiShowQuestion",
        description = "Show the question side of the current card."
    )]
    async fn gui_show_question(&self) -> Result<CallToolResult, McpError> {
        self.check_write("guiShowQuestion")?;
        let result = self.invoke_without_params("guiShowQuestion").await?;
        if result.as_bool() == Some(true) {
            Ok(text("Showing the question side"))
        } else {
            Ok(text("Not currently in review"))
        }
    }

    #[tool(
        name = "guiShowAnswer",
        description = "Show the answer side of the current card."
    )]
    async fn gui_show_answer(&self) -> Result<CallToolResult, McpError> {
        self.check_write("guiShowAnswer")?;
        let result = self.invoke_without_params("guiShowAnswer").await?;
        if result.as_bool() == Some(true) {
            Ok(text("Showing the answer side"))
        } else {
            Ok(text("Not currently in review"))
        }
    }

    #[tool(
        name = "guiAnswerCard",
        description = "Answer the current card. The answer side must be visible. Ease is 1 (Again) through 4 (Easy)."
    )]
    async fn gui_answer_card(
        &self,
        Parameters(params): Parameters<GuiAnswerCardParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("guiAnswerCard")?;
        let result = self.invoke("guiAnswerCard", &params).await?;
        if result.as_bool() == Some(true) {
            info!(ease = params.ease, "Current card answered");
            Ok(text("Answered the current card"))
        } else {
            Ok(text("Failed to answer the current card"))
        }
    }

    #[tool(name = "guiUndo", description = "Undo the last action or review.")]
    async fn gui_undo(&self) -> Result<CallToolResult, McpError> {
        self.check_write("guiUndo")?;
        let result = self.invoke_without_params("guiUndo").await?;
        if result.as_bool() == Some(true) {
            Ok(text("Undid the last action"))
        } else {
            Ok(text("Nothing to undo"))
        }
    }

    #[tool(
        name = "guiDeckOverview",
        description = "Open the deck overview screen for the given deck."
    )]
    async fn gui_deck_overview(
        &self,
        Parameters(params): Parameters<GuiDeckParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.invoke("guiDeckOverview", &params).await?;
        if result.as_bool() == Some(true) {
            Ok(text(format!("Opened deck overview for '{}'", params.name)))
        } else {
            Ok(text(format!(
                "Failed to open deck overview for '{}'",
                params.name
            )))
        }
    }

    #[tool(name = "guiDeckBrowser", description = "Open the deck browser screen.")]
    async fn gui_deck_browser(&self) -> Result<CallToolResult, McpError> {
        self.invoke_without_params("guiDeckBrowser").await?;
        Ok(text("Opened the deck browser"))
    }

    #[tool(
        name = "guiDeckReview",
        description = "Start reviewing the given deck."
    )]
    async fn gui_deck_review(
        &self,
        Parameters(params): Parameters<GuiDeckParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.invoke("guiDeckReview", &params).await?;
        if result.as_bool() == Some(true) {
            Ok(text(format!("Started review for '{}'", params.name)))
        } else {
            Ok(text(format!("Failed to start review for '{}'", params.name)))
        }
    }

    #[tool(
        name = "guiImportFile",
        description = "Open the import dialog, optionally preloaded with a file."
    )]
    async fn gui_import_file(
        &self,
        Parameters(params): Parameters<GuiImportFileParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("guiImportFile")?;
        self.invoke("guiImportFile", &params).await?;
        match params.path {
            Some(path) => Ok(text(format!("Opened the import dialog for '{}'", path))),
            None => Ok(text("Opened the import dialog")),
        }
    }

    #[tool(name = "guiExitAnki", description = "Schedule a request to quit Anki.")]
    async fn gui_exit_anki(&self) -> Result<CallToolResult, McpError> {
        self.check_write("guiExitAnki")?;
        self.invoke_without_params("guiExitAnki").await?;
        info!("Anki exit requested");
        Ok(text("Told Anki to exit"))
    }

    #[tool(
        name = "guiCheckDatabase",
        description = "Start a database check. Returns immediately; the check runs in Anki."
    )]
    async fn gui_check_database(&self) -> Result<CallToolResult, McpError> {
        self.check_write("guiCheckDatabase")?;
        self.invoke_without_params("guiCheckDatabase").await?;
        Ok(text("Database check started"))
    }

    // ========================================================================
    // Media actions
    // ========================================================================

    #[tool(
        name = "storeMediaFile",
        description = "Store a file in Anki's media folder from base64 data, a local path, or a URL. Returns the filename used."
    )]
    async fn store_media_file(
        &self,
        Parameters(params): Parameters<StoreMediaFileParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("storeMediaFile")?;
        if params.data.is_none() && params.path.is_none() && params.url.is_none() {
            return Err(McpError::invalid_params(
                "one of data, path, or url is required",
                None,
            ));
        }

        let result = self.invoke("storeMediaFile", &params).await?;
        let stored = result.as_str().unwrap_or(&params.filename);
        info!(filename = stored, "Media file stored");
        Ok(text(format!("Stored media file as '{}'", stored)))
    }

    #[tool(
        name = "retrieveMediaFile",
        description = "Retrieve the base64-encoded contents of a file in the media folder."
    )]
    async fn retrieve_media_file(
        &self,
        Parameters(params): Parameters<FilenameParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.invoke("retrieveMediaFile", &params).await?;
        match result.as_str() {
            Some(contents) => Ok(text(contents.to_string())),
            None => Ok(text(format!("Media file '{}' not found", params.filename))),
        }
    }

    #[tool(
        name = "getMediaFilesNames",
        description = "List the names of files in the media folder matching a glob pattern."
    )]
    async fn get_media_files_names(
        &self,
        Parameters(params): Parameters<GetMediaFilesNamesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("getMediaFilesNames", &params).await
    }

    #[tool(
        name = "getMediaDirPath",
        description = "Get the full path to Anki's collection.media folder."
    )]
    async fn get_media_dir_path(&self) -> Result<CallToolResult, McpError> {
        let result = self.invoke_without_params("getMediaDirPath").await?;
        match result.as_str() {
            Some(path) => Ok(text(path.to_string())),
            None => Ok(json_text(&result)),
        }
    }

    #[tool(
        name = "deleteMediaFile",
        description = "Delete a file from Anki's media folder."
    )]
    async fn delete_media_file(
        &self,
        Parameters(params): Parameters<FilenameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("deleteMediaFile")?;
        self.invoke("deleteMediaFile", &params).await?;
        info!(filename = %params.filename, "Media file deleted");
        Ok(text(format!("Deleted media file '{}'", params.filename)))
    }

    // ========================================================================
    // Miscellaneous actions
    // ========================================================================

    #[tool(
        name = "requestPermission",
        description = "Request permission to use the AnkiConnect API. May show a confirmation dialog in Anki. The only action that never requires the API key."
    )]
    async fn request_permission(&self) -> Result<CallToolResult, McpError> {
        self.forward_json_without_params("requestPermission").await
    }

    #[tool(
        name = "version",
        description = "Get the AnkiConnect API version. Useful for checking that Anki is running."
    )]
    async fn version(&self) -> Result<CallToolResult, McpError> {
        let result = self.invoke_without_params("version").await?;
        Ok(text(format!("AnkiConnect version: {}", result)))
    }

    #[tool(
        name = "apiReflect",
        description = "Reflect over the AnkiConnect API: which of the given actions the endpoint supports."
    )]
    async fn api_reflect(
        &self,
        Parameters(params): Parameters<ApiReflectParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("apiReflect", &params).await
    }

    #[tool(name = "sync", description = "Synchronize the local collection with AnkiWeb.")]
    async fn sync(&self) -> Result<CallToolResult, McpError> {
        self.check_write("sync")?;
        self.invoke_without_params("sync").await?;
        info!("Collection synced with AnkiWeb");
        Ok(text("Sync completed successfully"))
    }

    #[tool(name = "getProfiles", description = "Get the names of all Anki profiles.")]
    async fn get_profiles(&self) -> Result<CallToolResult, McpError> {
        self.forward_json_without_params("getProfiles").await
    }

    #[tool(
        name = "getActiveProfile",
        description = "Get the name of the currently loaded profile."
    )]
    async fn get_active_profile(&self) -> Result<CallToolResult, McpError> {
        let result = self.invoke_without_params("getActiveProfile").await?;
        match result.as_str() {
            Some(name) => Ok(text(name.to_string())),
            None => Ok(json_text(&result)),
        }
    }

    #[tool(name = "loadProfile", description = "Switch to the named Anki profile.")]
    async fn load_profile(
        &self,
        Parameters(params): Parameters<LoadProfileParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("loadProfile")?;
        let result = self.invoke("loadProfile", &params).await?;
        if result.as_bool() == Some(true) {
            info!(profile = %params.name, "Profile loaded");
            Ok(text(format!("Loaded profile '{}'", params.name)))
        } else {
            Ok(text(format!("Failed to load profile '{}'", params.name)))
        }
    }

    #[tool(
        name = "multi",
        description = "Perform multiple actions in one request. Returns an array with the result of each action in order."
    )]
    async fn multi(
        &self,
        Parameters(params): Parameters<MultiParams>,
    ) -> Result<CallToolResult, McpError> {
        // A batch can contain writes, so the whole batch counts as one.
        self.check_write("multi")?;
        self.forward_json("multi", &params).await
    }

    #[tool(
        name = "exportPackage",
        description = "Export a deck to an .apkg file at the given path."
    )]
    async fn export_package(
        &self,
        Parameters(params): Parameters<ExportPackageParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("exportPackage")?;
        let result = self.invoke("exportPackage", &params).await?;
        if result.as_bool() == Some(true) {
            info!(deck = %params.deck, path = %params.path, "Deck exported");
            Ok(text(format!(
                "Exported deck '{}' to '{}'",
                params.deck, params.path
            )))
        } else {
            Ok(text(format!("Failed to export deck '{}'", params.deck)))
        }
    }

    #[tool(
        name = "importPackage",
        description = "Import an .apkg file into the collection. The path is relative to Anki's collection folder."
    )]
    async fn import_package(
        &self,
        Parameters(params): Parameters<ImportPackageParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("importPackage")?;
        let result = self.invoke("importPackage", &params).await?;
        if result.as_bool() == Some(true) {
            info!(path = %params.path, "Package imported");
            Ok(text(format!("Imported package '{}'", params.path)))
        } else {
            Ok(text(format!("Failed to import package '{}'", params.path)))
        }
    }

    #[tool(
        name = "reloadCollection",
        description = "Reload the collection from disk, picking up external changes."
    )]
    async fn reload_collection(&self) -> Result<CallToolResult, McpError> {
        self.invoke_without_params("reloadCollection").await?;
        Ok(text("Collection reloaded"))
    }

    // ========================================================================
    // Model actions
    // ========================================================================

    #[tool(name = "modelNames", description = "Get the names of all models (note types).")]
    async fn model_names(&self) -> Result<CallToolResult, McpError> {
        self.forward_json_without_params("modelNames").await
    }

    #[tool(
        name = "modelNamesAndIds",
        description = "Get the names of all models together with their IDs."
    )]
    async fn model_names_and_ids(&self) -> Result<CallToolResult, McpError> {
        self.forward_json_without_params("modelNamesAndIds").await
    }

    #[tool(
        name = "findModelsById",
        description = "Get the full definition of each model with the given IDs."
    )]
    async fn find_models_by_id(
        &self,
        Parameters(params): Parameters<FindModelsByIdParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("findModelsById", &params).await
    }

    #[tool(
        name = "findModelsByName",
        description = "Get the full definition of each model with the given names."
    )]
    async fn find_models_by_name(
        &self,
        Parameters(params): Parameters<FindModelsByNameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("findModelsByName", &params).await
    }

    #[tool(
        name = "modelFieldNames",
        description = "Get the field names of a model, in display order."
    )]
    async fn model_field_names(
        &self,
        Parameters(params): Parameters<ModelNameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("modelFieldNames", &params).await
    }

    #[tool(
        name = "modelFieldDescriptions",
        description = "Get the field descriptions of a model, in display order."
    )]
    async fn model_field_descriptions(
        &self,
        Parameters(params): Parameters<ModelNameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("modelFieldDescriptions", &params).await
    }

    #[tool(
        name = "modelFieldFonts",
        description = "Get the font name and size configured for each field of a model."
    )]
    async fn model_field_fonts(
        &self,
        Parameters(params): Parameters<ModelNameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("modelFieldFonts", &params).await
    }

    #[tool(
        name = "modelFieldsOnTemplates",
        description = "Get which fields appear on the front and back of each template of a model."
    )]
    async fn model_fields_on_templates(
        &self,
        Parameters(params): Parameters<ModelNameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("modelFieldsOnTemplates", &params).await
    }

    #[tool(
        name = "createModel",
        description = "Create a new model (note type) with the given fields and card templates. Returns the created model."
    )]
    async fn create_model(
        &self,
        Parameters(params): Parameters<CreateModelParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("createModel")?;
        let result = self.invoke("createModel", &params).await?;
        info!(model = %params.model_name, "Model created");
        Ok(json_text(&result))
    }

    #[tool(
        name = "modelTemplates",
        description = "Get the front and back content of each template of a model."
    )]
    async fn model_templates(
        &self,
        Parameters(params): Parameters<ModelNameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("modelTemplates", &params).await
    }

    #[tool(name = "modelStyling", description = "Get the CSS styling of a model.")]
    async fn model_styling(
        &self,
        Parameters(params): Parameters<ModelNameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("modelStyling", &params).await
    }

    #[tool(
        name = "updateModelTemplates",
        description = "Update the front and back content of some or all templates of an existing model."
    )]
    async fn update_model_templates(
        &self,
        Parameters(params): Parameters<UpdateModelTemplatesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("updateModelTemplates")?;
        self.invoke("updateModelTemplates", &params).await?;
        info!(model = %params.model.name, "Model templates updated");
        Ok(text(format!(
            "Updated {} templates of model '{}'",
            params.model.templates.len(),
            params.model.name
        )))
    }

    #[tool(
        name = "updateModelStyling",
        description = "Replace the CSS styling of an existing model."
    )]
    async fn update_model_styling(
        &self,
        Parameters(params): Parameters<UpdateModelStylingParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("updateModelStyling")?;
        self.invoke("updateModelStyling", &params).await?;
        info!(model = %params.model.name, "Model styling updated");
        Ok(text(format!(
            "Updated styling of model '{}'",
            params.model.name
        )))
    }

    #[tool(
        name = "findAndReplaceInModels",
        description = "Find and replace text in the templates or CSS of a model. An empty modelName searches all models. Returns the number of models changed."
    )]
    async fn find_and_replace_in_models(
        &self,
        Parameters(params): Parameters<FindAndReplaceInModelsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("findAndReplaceInModels")?;
        let result = self.invoke("findAndReplaceInModels", &params).await?;
        Ok(text(format!(
            "Replaced '{}' with '{}' in {} models",
            params.model.find_text, params.model.replace_text, result
        )))
    }

    #[tool(name = "modelTemplateRename", description = "Rename a template of a model.")]
    async fn model_template_rename(
        &self,
        Parameters(params): Parameters<ModelTemplateRenameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("modelTemplateRename")?;
        self.invoke("modelTemplateRename", &params).await?;
        Ok(text(format!(
            "Renamed template '{}' to '{}' in model '{}'",
            params.old_template_name, params.new_template_name, params.model_name
        )))
    }

    #[tool(
        name = "modelTemplateReposition",
        description = "Move a template to a new position in the template list of a model."
    )]
    async fn model_template_reposition(
        &self,
        Parameters(params): Parameters<ModelTemplateRepositionParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("modelTemplateReposition")?;
        self.invoke("modelTemplateReposition", &params).await?;
        Ok(text(format!(
            "Moved template '{}' to index {}",
            params.template_name, params.index
        )))
    }

    #[tool(name = "modelTemplateAdd", description = "Add a new template to a model.")]
    async fn model_template_add(
        &self,
        Parameters(params): Parameters<ModelTemplateAddParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("modelTemplateAdd")?;
        self.invoke("modelTemplateAdd", &params).await?;
        info!(model = %params.model_name, template = %params.template.name, "Template added");
        Ok(text(format!(
            "Added template '{}' to model '{}'",
            params.template.name, params.model_name
        )))
    }

    #[tool(name = "modelTemplateRemove", description = "Remove a template from a model.")]
    async fn model_template_remove(
        &self,
        Parameters(params): Parameters<ModelTemplateRemoveParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("modelTemplateRemove")?;
        self.invoke("modelTemplateRemove", &params).await?;
        info!(model = %params.model_name, template = %params.template_name, "Template removed");
        Ok(text(format!(
            "Removed template '{}' from model '{}'",
            params.template_name, params.model_name
        )))
    }

    #[tool(name = "modelFieldRename", description = "Rename a field of a model.")]
    async fn model_field_rename(
        &self,
        Parameters(params): Parameters<ModelFieldRenameParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("modelFieldRename")?;
        self.invoke("modelFieldRename", &params).await?;
        Ok(text(format!(
            "Renamed field '{}' to '{}' in model '{}'",
            params.old_field_name, params.new_field_name, params.model_name
        )))
    }

    #[tool(
        name = "modelFieldReposition",
        description = "Move a field to a new position in the field list of a model."
    )]
    async fn model_field_reposition(
        &self,
        Parameters(params): Parameters<ModelFieldRepositionParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("modelFieldReposition")?;
        self.invoke("modelFieldReposition", &params).await?;
        Ok(text(format!(
            "Moved field '{}' to index {}",
            params.field_name, params.index
        )))
    }

    #[tool(
        name = "modelFieldAdd",
        description = "Add a new field to a model, optionally at a specific position."
    )]
    async fn model_field_add(
        &self,
        Parameters(params): Parameters<ModelFieldAddParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("modelFieldAdd")?;
        self.invoke("modelFieldAdd", &params).await?;
        info!(model = %params.model_name, field = %params.field_name, "Field added");
        Ok(text(format!(
            "Added field '{}' to model '{}'",
            params.field_name, params.model_name
        )))
    }

    #[tool(name = "modelFieldRemove", description = "Remove a field from a model.")]
    async fn model_field_remove(
        &self,
        Parameters(params): Parameters<ModelFieldRemoveParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("modelFieldRemove")?;
        self.invoke("modelFieldRemove", &params).await?;
        info!(model = %params.model_name, field = %params.field_name, "Field removed");
        Ok(text(format!(
            "Removed field '{}' from model '{}'",
            params.field_name, params.model_name
        )))
    }

    #[tool(
        name = "modelFieldSetFont",
        description = "Set the editor font of a field."
    )]
    async fn model_field_set_font(
        &self,
        Parameters(params): Parameters<ModelFieldSetFontParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("modelFieldSetFont")?;
        self.invoke("modelFieldSetFont", &params).await?;
        Ok(text(format!(
            "Set font of field '{}' to '{}'",
            params.field_name, params.font
        )))
    }

    #[tool(
        name = "modelFieldSetFontSize",
        description = "Set the editor font size of a field."
    )]
    async fn model_field_set_font_size(
        &self,
        Parameters(params): Parameters<ModelFieldSetFontSizeParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("modelFieldSetFontSize")?;
        self.invoke("modelFieldSetFontSize", &params).await?;
        Ok(text(format!(
            "Set font size of field '{}' to {}",
            params.field_name, params.font_size
        )))
    }

    #[tool(
        name = "modelFieldSetDescription",
        description = "Set the description of a field, shown as a hint in the editor on newer Anki versions."
    )]
    async fn model_field_set_description(
        &self,
        Parameters(params): Parameters<ModelFieldSetDescriptionParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("modelFieldSetDescription")?;
        let result = self.invoke("modelFieldSetDescription", &params).await?;
        if result.as_bool() == Some(true) {
            Ok(text(format!(
                "Set description of field '{}'",
                params.field_name
            )))
        } else {
            Ok(text(
                "Field descriptions are not supported by this Anki version",
            ))
        }
    }

    // ========================================================================
    // Note actions
    // ========================================================================

    #[tool(
        name = "addNote",
        description = "Add a single note. Returns the new note ID. Fails on duplicates unless options.allowDuplicate is set."
    )]
    async fn add_note(
        &self,
        Parameters(params): Parameters<AddNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("addNote")?;
        let result = self.invoke("addNote", &params).await?;
        info!(deck = %params.note.deck_name, model = %params.note.model_name, "Note created");
        Ok(text(format!("Created note with ID: {}", result)))
    }

    #[tool(
        name = "addNotes",
        description = "Add multiple notes. Returns an array with the new note ID of each note, or null where adding failed."
    )]
    async fn add_notes(
        &self,
        Parameters(params): Parameters<NotesInputParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("addNotes")?;
        let result = self.invoke("addNotes", &params).await?;
        info!(count = params.notes.len(), "Notes added");
        Ok(json_text(&result))
    }

    #[tool(
        name = "canAddNotes",
        description = "Check whether each of the given notes could be added (deck and model exist, no blocking duplicate)."
    )]
    async fn can_add_notes(
        &self,
        Parameters(params): Parameters<NotesInputParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("canAddNotes", &params).await
    }

    #[tool(
        name = "canAddNotesWithErrorDetail",
        description = "Check whether each of the given notes could be added, with the reason for each note that cannot."
    )]
    async fn can_add_notes_with_error_detail(
        &self,
        Parameters(params): Parameters<NotesInputParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("canAddNotesWithErrorDetail", &params).await
    }

    #[tool(
        name = "updateNoteFields",
        description = "Update the field values of an existing note. Close the note in any open editor first, or the update may be lost."
    )]
    async fn update_note_fields(
        &self,
        Parameters(params): Parameters<UpdateNoteFieldsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("updateNoteFields")?;
        self.invoke("updateNoteFields", &params).await?;
        info!(note_id = params.note.id, "Note fields updated");
        Ok(text(format!("Updated fields of note {}", params.note.id)))
    }

    #[tool(
        name = "updateNote",
        description = "Update the fields and/or tags of an existing note. At least one of fields or tags must be given."
    )]
    async fn update_note(
        &self,
        Parameters(params): Parameters<UpdateNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("updateNote")?;
        if params.note.fields.is_none() && params.note.tags.is_none() {
            return Err(McpError::invalid_params(
                "either fields or tags must be provided",
                None,
            ));
        }

        self.invoke("updateNote", &params).await?;
        info!(note_id = params.note.id, "Note updated");
        Ok(text(format!("Updated note {}", params.note.id)))
    }

    #[tool(
        name = "updateNoteModel",
        description = "Change the model of a note, mapping its content onto the new model's fields and tags."
    )]
    async fn update_note_model(
        &self,
        Parameters(params): Parameters<UpdateNoteModelParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("updateNoteModel")?;
        self.invoke("updateNoteModel", &params).await?;
        info!(note_id = params.note.id, model = %params.note.model_name, "Note model changed");
        Ok(text(format!(
            "Changed note {} to model '{}'",
            params.note.id, params.note.model_name
        )))
    }

    #[tool(
        name = "updateNoteTags",
        description = "Replace the tags of a note with the given list."
    )]
    async fn update_note_tags(
        &self,
        Parameters(params): Parameters<UpdateNoteTagsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("updateNoteTags")?;
        self.invoke("updateNoteTags", &params).await?;
        Ok(text(format!(
            "Set {} tags on note {}",
            params.tags.len(),
            params.note
        )))
    }

    #[tool(name = "getNoteTags", description = "Get the tags of a note.")]
    async fn get_note_tags(
        &self,
        Parameters(params): Parameters<NoteParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("getNoteTags", &params).await
    }

    #[tool(
        name = "addTags",
        description = "Add tags to notes. Tags are space-separated (e.g., 'tag1 tag2')."
    )]
    async fn add_tags(
        &self,
        Parameters(params): Parameters<NoteTagsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("addTags")?;
        self.invoke("addTags", &params).await?;
        info!(count = params.notes.len(), tags = %params.tags, "Tags added");
        Ok(text(format!(
            "Added tags '{}' to {} notes",
            params.tags,
            params.notes.len()
        )))
    }

    #[tool(
        name = "removeTags",
        description = "Remove tags from notes. Tags are space-separated (e.g., 'tag1 tag2')."
    )]
    async fn remove_tags(
        &self,
        Parameters(params): Parameters<NoteTagsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("removeTags")?;
        self.invoke("removeTags", &params).await?;
        info!(count = params.notes.len(), tags = %params.tags, "Tags removed");
        Ok(text(format!(
            "Removed tags '{}' from {} notes",
            params.tags,
            params.notes.len()
        )))
    }

    #[tool(name = "getTags", description = "Get all tags in the collection.")]
    async fn get_tags(&self) -> Result<CallToolResult, McpError> {
        self.forward_json_without_params("getTags").await
    }

    #[tool(
        name = "clearUnusedTags",
        description = "Remove all tags that are not used by any notes."
    )]
    async fn clear_unused_tags(&self) -> Result<CallToolResult, McpError> {
        self.check_write("clearUnusedTags")?;
        self.invoke_without_params("clearUnusedTags").await?;
        info!("Unused tags cleared");
        Ok(text("Cleared all unused tags"))
    }

    #[tool(
        name = "replaceTags",
        description = "Replace a tag with another one on the given notes."
    )]
    async fn replace_tags(
        &self,
        Parameters(params): Parameters<ReplaceTagsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("replaceTags")?;
        self.invoke("replaceTags", &params).await?;
        Ok(text(format!(
            "Replaced tag '{}' with '{}' on {} notes",
            params.tag_to_replace,
            params.replace_with_tag,
            params.notes.len()
        )))
    }

    #[tool(
        name = "replaceTagsInAllNotes",
        description = "Replace a tag with another one across every note in the collection."
    )]
    async fn replace_tags_in_all_notes(
        &self,
        Parameters(params): Parameters<ReplaceTagsInAllNotesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("replaceTagsInAllNotes")?;
        self.invoke("replaceTagsInAllNotes", &params).await?;
        info!(old = %params.tag_to_replace, new = %params.replace_with_tag, "Tag replaced globally");
        Ok(text(format!(
            "Replaced tag '{}' with '{}' across all notes",
            params.tag_to_replace, params.replace_with_tag
        )))
    }

    #[tool(
        name = "findNotes",
        description = "Find notes using Anki search syntax (e.g., 'deck:Japanese tag:verb'). Returns note IDs."
    )]
    async fn find_notes(
        &self,
        Parameters(params): Parameters<QueryParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("findNotes", &params).await
    }

    #[tool(
        name = "notesInfo",
        description = "Get detailed information about notes including model, fields, tags, and the cards generated from them."
    )]
    async fn notes_info(
        &self,
        Parameters(params): Parameters<NotesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("notesInfo", &params).await
    }

    #[tool(
        name = "notesModTime",
        description = "Get the modification time for each of the given notes."
    )]
    async fn notes_mod_time(
        &self,
        Parameters(params): Parameters<NotesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("notesModTime", &params).await
    }

    #[tool(
        name = "deleteNotes",
        description = "Delete notes by ID. All cards generated from the notes are deleted as well."
    )]
    async fn delete_notes(
        &self,
        Parameters(params): Parameters<NotesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("deleteNotes")?;
        self.invoke("deleteNotes", &params).await?;
        info!(count = params.notes.len(), "Notes deleted");
        Ok(text(format!("Deleted {} notes", params.notes.len())))
    }

    #[tool(
        name = "removeEmptyNotes",
        description = "Remove all notes that no longer generate any cards."
    )]
    async fn remove_empty_notes(&self) -> Result<CallToolResult, McpError> {
        self.check_write("removeEmptyNotes")?;
        self.invoke_without_params("removeEmptyNotes").await?;
        info!("Empty notes removed");
        Ok(text("Removed empty notes"))
    }

    // ========================================================================
    // Statistics actions
    // ========================================================================

    #[tool(
        name = "getNumCardsReviewedToday",
        description = "Get the number of cards reviewed today (since the collection's day rollover)."
    )]
    async fn get_num_cards_reviewed_today(&self) -> Result<CallToolResult, McpError> {
        let result = self
            .invoke_without_params("getNumCardsReviewedToday")
            .await?;
        Ok(text(format!("{} cards reviewed today", result)))
    }

    #[tool(
        name = "getNumCardsReviewedByDay",
        description = "Get the number of cards reviewed per day, as (date, count) pairs."
    )]
    async fn get_num_cards_reviewed_by_day(&self) -> Result<CallToolResult, McpError> {
        self.forward_json_without_params("getNumCardsReviewedByDay")
            .await
    }

    #[tool(
        name = "getCollectionStatsHTML",
        description = "Get the collection statistics report as HTML."
    )]
    async fn get_collection_stats_html(
        &self,
        Parameters(params): Parameters<GetCollectionStatsHtmlParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.invoke("getCollectionStatsHTML", &params).await?;
        match result.as_str() {
            Some(html) => Ok(text(html.to_string())),
            None => Ok(json_text(&result)),
        }
    }

    #[tool(
        name = "cardReviews",
        description = "Get the reviews of cards in a deck that happened after the given review ID (unix time in ms)."
    )]
    async fn card_reviews(
        &self,
        Parameters(params): Parameters<CardReviewsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("cardReviews", &params).await
    }

    #[tool(
        name = "getReviewsOfCards",
        description = "Get the full review history of each of the given cards."
    )]
    async fn get_reviews_of_cards(
        &self,
        Parameters(params): Parameters<CardsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.forward_json("getReviewsOfCards", &params).await
    }

    #[tool(
        name = "getLatestReviewID",
        description = "Get the ID (unix time in ms) of the latest review in a deck. Returns 0 if the deck has no reviews."
    )]
    async fn get_latest_review_id(
        &self,
        Parameters(params): Parameters<GetLatestReviewIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.invoke("getLatestReviewID", &params).await?;
        Ok(text(format!(
            "Latest review ID for deck '{}': {}",
            params.deck, result
        )))
    }

    #[tool(
        name = "insertReviews",
        description = "Insert review records into the review history. Each review is a 9-tuple."
    )]
    async fn insert_reviews(
        &self,
        Parameters(params): Parameters<InsertReviewsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.check_write("insertReviews")?;
        self.invoke("insertReviews", &params).await?;
        info!(count = params.reviews.len(), "Reviews inserted");
        Ok(text(format!("Inserted {} reviews", params.reviews.len())))
    }
}

#[tool_handler]
impl ServerHandler for AnkiConnectServer {
    fn get_info(&self) -> ServerInfo {
        let mode = if self.read_only { " (read-only)" } else { "" };
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Raw AnkiConnect API access{}. Requires Anki to be running with \
                 the AnkiConnect add-on installed. Tool names and parameters \
                 mirror the AnkiConnect action vocabulary: deckNames, addNote, \
                 findCards, suspend, storeMediaFile, guiDeckReview, and so on.",
                mode
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn anki_ok<T: Serialize>(result: T) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"result": result, "error": null}))
    }

    fn anki_err(error: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"result": null, "error": error}))
    }

    fn server_for(mock: &MockServer) -> AnkiConnectServer {
        let client = AnkiConnectClient::builder().url(mock.uri()).build();
        AnkiConnectServer::new(client, false)
    }

    /// Pull the first text block out of a tool result.
    fn result_text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[test]
    fn router_lists_every_action_exactly_once() {
        let tools = AnkiConnectServer::tool_router().list_all();
        let mut names: Vec<String> = tools.iter().map(|t| t.name.to_string()).collect();
        let total = names.len();
        names.sort();
        names.dedup();

        assert_eq!(names.len(), total, "duplicate tool names registered");
        assert_eq!(total, 114);

        for expected in [
            "createDeck",
            "setEaseFactors",
            "suspend",
            "addNote",
            "deckNames",
            "storeMediaFile",
            "guiDeckReview",
            "getLatestReviewID",
        ] {
            assert!(
                names.iter().any(|name| name == expected),
                "missing tool {expected}"
            );
        }
        assert!(!names.iter().any(|name| name == "doesNotExist"));
    }

    #[test]
    fn every_tool_has_a_description_and_an_object_schema() {
        for tool in AnkiConnectServer::tool_router().list_all() {
            assert!(
                tool.description.as_deref().is_some_and(|d| !d.is_empty()),
                "tool {} has no description",
                tool.name
            );
            assert_eq!(
                tool.input_schema.get("type").and_then(|t| t.as_str()),
                Some("object"),
                "tool {} schema is not an object",
                tool.name
            );
        }
    }

    #[tokio::test]
    async fn create_deck_reports_the_new_deck_id() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "action": "createDeck",
                "version": 6,
                "params": {"deck": "Spanish"}
            })))
            .respond_with(anki_ok(1694938000000_i64))
            .expect(1)
            .mount(&mock)
            .await;

        let server = server_for(&mock);
        let result = server
            .create_deck(Parameters(DeckParams {
                deck: "Spanish".into(),
            }))
            .await
            .unwrap();

        assert!(result_text(&result).contains("1694938000000"));
    }

    #[tokio::test]
    async fn set_ease_factors_rejects_mismatched_lengths_before_any_request() {
        let mock = MockServer::start().await;
        let server = server_for(&mock);

        let err = server
            .set_ease_factors(Parameters(SetEaseFactorsParams {
                cards: vec![1, 2],
                ease_factors: vec![2500],
            }))
            .await
            .unwrap_err();

        assert!(err.message.contains("easeFactors"));
        assert!(
            mock.received_requests().await.unwrap().is_empty(),
            "validation must reject the call before any network activity"
        );
    }

    #[tokio::test]
    async fn suspend_reports_soft_failure_when_endpoint_returns_false() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"action": "suspend"})))
            .respond_with(anki_ok(false))
            .expect(1)
            .mount(&mock)
            .await;

        let server = server_for(&mock);
        let result = server
            .suspend(Parameters(CardsParams {
                cards: vec![12345],
            }))
            .await
            .unwrap();

        assert!(result_text(&result).contains("already suspended"));
    }

    #[tokio::test]
    async fn remote_error_message_surfaces_verbatim() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"action": "createDeck"})))
            .respond_with(anki_err("deck was not found"))
            .expect(1)
            .mount(&mock)
            .await;

        let server = server_for(&mock);
        let err = server
            .create_deck(Parameters(DeckParams {
                deck: "Missing".into(),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.message.to_string(), "deck was not found");
    }

    #[tokio::test]
    async fn get_ease_factors_renders_the_raw_result_as_json() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"action": "getEaseFactors"})))
            .respond_with(anki_ok(vec![2500, 2600]))
            .expect(1)
            .mount(&mock)
            .await;

        let server = server_for(&mock);
        let result = server
            .get_ease_factors(Parameters(CardsParams {
                cards: vec![1, 2],
            }))
            .await
            .unwrap();

        let rendered: Value = serde_json::from_str(&result_text(&result)).unwrap();
        assert_eq!(rendered, json!([2500, 2600]));
    }

    #[tokio::test]
    async fn read_only_mode_blocks_writes_without_calling_the_endpoint() {
        let mock = MockServer::start().await;
        let client = AnkiConnectClient::builder().url(mock.uri()).build();
        let server = AnkiConnectServer::new(client, true);

        let err = server
            .delete_notes(Parameters(NotesParams { notes: vec![1] }))
            .await
            .unwrap_err();

        assert!(err.message.contains("read-only"));
        assert!(mock.received_requests().await.unwrap().is_empty());

        // Reads still go through.
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"action": "deckNames"})))
            .respond_with(anki_ok(vec!["Default"]))
            .expect(1)
            .mount(&mock)
            .await;
        server.deck_names().await.unwrap();
    }

    #[tokio::test]
    async fn store_media_file_requires_a_source() {
        let mock = MockServer::start().await;
        let server = server_for(&mock);

        let err = server
            .store_media_file(Parameters(StoreMediaFileParams {
                filename: "note.txt".into(),
                data: None,
                path: None,
                url: None,
                delete_existing: None,
            }))
            .await
            .unwrap_err();

        assert!(err.message.contains("data, path, or url"));
        assert!(mock.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_note_requires_fields_or_tags() {
        let mock = MockServer::start().await;
        let server = server_for(&mock);

        let err = server
            .update_note(Parameters(UpdateNoteParams {
                note: UpdateNoteInput {
                    id: 1,
                    fields: None,
                    tags: None,
                },
            }))
            .await
            .unwrap_err();

        assert!(err.message.contains("fields or tags"));
        assert!(mock.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_note_forwards_the_camel_case_note_shape() {
        let mock = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "action": "addNote",
                "params": {
                    "note": {
                        "deckName": "Default",
                        "modelName": "Basic",
                        "fields": {"Front": "Hello", "Back": "World"},
                        "tags": ["greeting"]
                    }
                }
            })))
            .respond_with(anki_ok(1496198395707_i64))
            .expect(1)
            .mount(&mock)
            .await;

        let server = server_for(&mock);
        let result = server
            .add_note(Parameters(AddNoteParams {
                note: NoteInput {
                    deck_name: "Default".into(),
                    model_name: "Basic".into(),
                    fields: [
                        ("Front".to_string(), "Hello".to_string()),
                        ("Back".to_string(), "World".to_string()),
                    ]
                    .into(),
                    tags: vec!["greeting".into()],
                    options: None,
                    audio: None,
                    video: None,
                    picture: None,
                },
            }))
            .await
            .unwrap();

        assert!(result_text(&result).contains("1496198395707"));
    }
}
