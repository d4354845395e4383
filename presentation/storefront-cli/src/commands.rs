use anyhow::{Context, bail};

use business::domain::cart::errors::CartError;
use business::domain::quote::use_cases::get_all::GetQuotesParams;
use business::domain::quote::use_cases::request::RequestQuoteParams;
use business::domain::shared::value_objects::AccountId;
use remote::auth::SignUpParams;
use remote::credentials::AuthSession;

use crate::cli::{CartCommand, CheckoutArgs, Cli, Commands, QuoteArgs};
use crate::context::Storefront;
use crate::render;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut storefront = Storefront::connect(&cli.connection).await;

    match cli.command {
        Commands::Login(args) => {
            let session = storefront
                .auth
                .sign_in_with_password(&args.email, &args.password)
                .await
                .context("sign-in failed")?;
            signed_in(&mut storefront, &session).await?;
        }
        Commands::Signup(args) => {
            let session = storefront
                .auth
                .sign_up(SignUpParams {
                    email: args.email,
                    password: args.password,
                    first_name: args.first_name,
                    last_name: args.last_name,
                    phone: args.phone,
                })
                .await
                .context("sign-up failed")?;
            signed_in(&mut storefront, &session).await?;
        }
        Commands::Logout => {
            storefront.auth.sign_out().await;
            storefront.forget_session();
            storefront.sync_auth().await;
            println!("Signed out");
        }
        Commands::Cart(command) => {
            cart(&mut storefront, command).await?;
            println!("{}", render::cart(storefront.controller.state()));
        }
        Commands::Catalog => {
            let catalog = storefront.catalog.execute().await?;
            println!("{}", render::catalog(&catalog));
        }
        Commands::Checkout(args) => checkout(&mut storefront, args).await?,
        Commands::Orders => {
            let orders = storefront.controller.orders().await?;
            println!("{}", render::orders(&orders));
        }
        Commands::Quote(args) => quote(&storefront, args).await?,
        Commands::Quotes => {
            let account_id = signed_in_account(&storefront, "sign in to see your quotes")?;
            let quotes = storefront
                .quotes
                .execute(GetQuotesParams { account_id })
                .await?;
            println!("{}", render::quotes(&quotes));
        }
    }

    Ok(())
}

fn signed_in_account(storefront: &Storefront, hint: &str) -> anyhow::Result<AccountId> {
    storefront
        .controller
        .session()
        .account()
        .cloned()
        .context(hint.to_string())
}

/// A partial checkout prints what was ordered and stays stored until
/// `checkout --resume` finishes it.
async fn checkout(storefront: &mut Storefront, args: CheckoutArgs) -> anyhow::Result<()> {
    let account_id = signed_in_account(storefront, "sign in before checking out")?;
    let controller = &mut storefront.controller;
    let result = if args.resume {
        controller.resume_checkout().await
    } else {
        controller.checkout(&account_id).await
    };

    match result {
        Ok(report) => {
            println!("{}", render::checkout(&report));
            Ok(())
        }
        Err(CartError::CheckoutIncomplete) => {
            if let Some(report) = controller.pending_checkout() {
                println!("{}", render::checkout(report));
            }
            bail!("checkout incomplete, the cart was kept; run `checkout --resume` to retry")
        }
        Err(e) => Err(e.into()),
    }
}

async fn quote(storefront: &Storefront, args: QuoteArgs) -> anyhow::Result<()> {
    let account_id = signed_in_account(storefront, "sign in before requesting a quote")?;
    let quote = storefront
        .request_quote
        .execute(RequestQuoteParams {
            account_id,
            house_id: args.house.house_id,
            color_id: args.house.color_id,
            size_id: args.house.size_id,
            customizations: args.customizations,
            message: args.message,
        })
        .await?;
    println!("{}", render::quote(&quote));
    Ok(())
}

async fn cart(storefront: &mut Storefront, command: CartCommand) -> anyhow::Result<()> {
    let controller = &mut storefront.controller;
    match command {
        CartCommand::Show => {}
        CartCommand::Add(args) => {
            let configuration = storefront
                .configure
                .execute(args.house.configure_params())
                .await?;
            controller.add(configuration.line_props(args.quantity)).await?
        }
        CartCommand::Remove { id } => controller.remove(id).await?,
        CartCommand::Update { id, quantity } => controller.update_quantity(id, quantity).await?,
        CartCommand::Clear => controller.clear().await?,
    }
    Ok(())
}

async fn signed_in(storefront: &mut Storefront, session: &AuthSession) -> anyhow::Result<()> {
    storefront.remember_session(session)?;
    storefront.sync_auth().await;
    println!(
        "Signed in as {}",
        session.email.as_deref().unwrap_or(session.account_id.as_str())
    );
    println!("{}", render::cart(storefront.controller.state()));
    Ok(())
}
