use serde::Serialize;

use deck_core::filter::CompletionMap;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PrefsCommands;
use crate::context::AppContext;
use crate::output::output;
use crate::state::FilterSelection;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PrefsResponse {
    filters: FilterSelection,
    overrides: CompletionMap,
}

/// Handle `deck prefs <subcommand>`. Only local state is touched.
pub fn handle(action: &PrefsCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let state = &ctx.state;
    match action {
        PrefsCommands::Show => {}
        PrefsCommands::Set(args) => {
            let mut selection = state
                .filters()
                .with_flags(args.status, args.category, args.priority);
            if let Some(page) = args.page {
                selection = selection.with_page(page);
            }
            state.save_filters(&selection)?;
        }
        PrefsCommands::Reset => state.save_filters(&FilterSelection::default())?,
        PrefsCommands::Override { id, completed } => {
            let mut overrides = state.completion_overrides();
            overrides.set(*id, *completed);
            state.save_completion_overrides(&overrides)?;
        }
        PrefsCommands::ClearOverrides => state.save_completion_overrides(&CompletionMap::new())?,
    }

    output(
        &PrefsResponse {
            filters: state.filters(),
            overrides: state.completion_overrides(),
        },
        flags.format,
    )
}
