//! Handlers for the subcommands that talk to the account store and the API.

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::adapters::{InMemoryPinnedItemStore, ReqwestHttpClient};
use crate::cli_output::{
    icons, print_footer, print_header, print_prompt_card, print_prompt_list, print_status_line,
    print_table,
};
use crate::config::AppConfig;
use crate::models::{AccountSnapshot, Blog};
use crate::remote::{BloggingPromptsService, StatsRemote};
use crate::session::AccountHelper;
use crate::state::SharedInsightsStore;
use crate::traits::{AccountStore, LogoutHooks};
use crate::view_model::{PromptCard, SiteStatsInsightsViewModel};

async fn load_accounts(config: &AppConfig) -> Result<AccountSnapshot> {
    let store = config.account_store()?;
    debug!(path = %store.path().display(), "Loading accounts");
    store
        .load()
        .await
        .wrap_err_with(|| format!("reading {}", store.path().display()))
}

/// Refresh the store and print the insights table.
pub async fn handle_insights_command(config: &AppConfig, force: bool) -> Result<()> {
    let accounts = load_accounts(config).await?;
    let remote = StatsRemote::for_account(
        &accounts,
        config.site_id,
        ReqwestHttpClient::new(),
        &config.api_url,
    )?;

    let store = SharedInsightsStore::default();
    remote.refresh(&store, force).await;

    let mut view_model = SiteStatsInsightsViewModel::new(
        config.cards.clone(),
        store.clone(),
        Some(Arc::new(InMemoryPinnedItemStore::new())),
        config.features,
    );

    print_header(&format!("SITE INSIGHTS · {}", remote.site_id()));
    print_table(&view_model.table_view_model());

    if view_model.fetching_failed() {
        print_footer(&format!("{} Some insights could not be loaded.", icons::WARNING));
    } else {
        print_footer("");
    }
    Ok(())
}

fn prompts_service(
    config: &AppConfig,
    accounts: &AccountSnapshot,
) -> Result<BloggingPromptsService<ReqwestHttpClient>> {
    let blog = config.site_id.and_then(|site_id| {
        accounts
            .blogs
            .iter()
            .find(|blog| blog.dotcom_id == Some(site_id))
    });
    BloggingPromptsService::new(accounts, blog, ReqwestHttpClient::new(), &config.api_url)
        .ok_or_else(|| eyre!("blogging prompts need a signed-in WordPress.com account with a site"))
}

/// Print today's prompt as a dashboard card.
pub async fn handle_prompt_command(config: &AppConfig) -> Result<()> {
    let accounts = load_accounts(config).await?;
    let service = prompts_service(config, &accounts)?;

    let card = PromptCard::from_fetch(&service.fetch_todays_prompt().await);
    print_header("TODAY'S PROMPT");
    print_prompt_card(&card);
    print_footer("");
    Ok(())
}

/// Print the recent prompts list.
pub async fn handle_prompts_command(config: &AppConfig) -> Result<()> {
    let accounts = load_accounts(config).await?;
    let service = prompts_service(config, &accounts)?;

    let prompts = service.fetch_list_prompts().await?;
    print_header("BLOGGING PROMPTS");
    print_prompt_list(&prompts);
    print_footer("");
    Ok(())
}

/// Log and print the account tree.
pub async fn handle_accounts_command(config: &AppConfig) -> Result<()> {
    let helper = AccountHelper::new(config.account_store()?);
    let tree = helper.log_blogs_and_accounts().await?;
    print_header("ACCOUNTS");
    println!("{}", tree);
    print_footer("");
    Ok(())
}

/// Reports each cleanup step on stdout. Nothing else on this device
/// depends on the account.
struct CliLogoutHooks;

impl LogoutHooks for CliLogoutHooks {
    fn unschedule_reminders(&self, blogs: &[Blog]) {
        info!(count = blogs.len(), "Unscheduling blogging reminders");
        if !blogs.is_empty() {
            print_status_line(
                icons::SUCCESS,
                &format!("Reminders cleared for {} site(s)", blogs.len()),
            );
        }
    }
}

/// Sign the default account out.
pub async fn handle_logout_command(config: &AppConfig) -> Result<()> {
    let helper = AccountHelper::new(config.account_store()?);
    print_header("SIGN OUT");
    match helper.log_out_default_account(&CliLogoutHooks).await? {
        Some(account) => {
            print_status_line(icons::SUCCESS, &format!("Signed out {}", account.username))
        }
        None => print_status_line(icons::WARNING, "No WordPress.com account was signed in"),
    }
    print_footer("");
    Ok(())
}
