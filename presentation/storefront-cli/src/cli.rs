use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use business::domain::cart::model::CartLineId;
use business::domain::cart::session::SignInPolicy;
use business::domain::catalog::use_cases::configure::ConfigureHouseParams;
use business::domain::quote::model::Customization;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Container homes storefront", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Storefront REST API base URL
    #[arg(long, env = "STOREFRONT_API_URL", default_value = "http://127.0.0.1:8080")]
    pub api_url: String,

    /// Supabase project URL
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: String,

    /// Supabase anonymous (public) API key
    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    pub supabase_anon_key: String,

    /// File holding the anonymous cart and the signed-in session
    #[arg(
        long,
        env = "STOREFRONT_STORAGE_PATH",
        default_value = ".storefront/session.json"
    )]
    pub storage_path: String,

    /// Move the anonymous cart into the account on sign-in instead of discarding it
    #[arg(long)]
    pub merge_local_cart: bool,
}

impl ConnectionArgs {
    pub fn sign_in_policy(&self) -> SignInPolicy {
        if self.merge_local_cart {
            SignInPolicy::MergeLocal
        } else {
            SignInPolicy::DiscardLocal
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with e-mail and password
    Login(LoginArgs),
    /// Create an account, then sign in
    Signup(SignupArgs),
    /// End the current session
    Logout,
    /// Inspect or change the cart
    #[command(subcommand)]
    Cart(CartCommand),
    /// List the houses, colors and sizes on offer
    Catalog,
    /// Place one order per cart line, then empty the cart
    Checkout(CheckoutArgs),
    /// List the orders of the signed-in account
    Orders,
    /// Ask for a quote on a configured house with extras
    Quote(QuoteArgs),
    /// List the quotes requested by the signed-in account
    Quotes,
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Print the cart lines and totals
    Show,
    /// Put a configured house in the cart
    Add(AddLineArgs),
    /// Drop a line
    Remove { id: CartLineId },
    /// Set the quantity of a line; zero or less drops it
    Update {
        id: CartLineId,
        #[arg(allow_negative_numbers = true)]
        quantity: i32,
    },
    /// Drop every line
    Clear,
}

/// A house as picked from the catalog. Name and price come from the catalog.
#[derive(Debug, Args)]
pub struct HouseArgs {
    #[arg(long)]
    pub house_id: Uuid,

    /// Omit for the first color of the catalog
    #[arg(long)]
    pub color_id: Option<Uuid>,

    /// Omit for the first size of the catalog
    #[arg(long)]
    pub size_id: Option<Uuid>,
}

impl HouseArgs {
    pub fn configure_params(&self) -> ConfigureHouseParams {
        ConfigureHouseParams {
            house_id: self.house_id,
            color_id: self.color_id,
            size_id: self.size_id,
        }
    }
}

#[derive(Debug, Args)]
pub struct AddLineArgs {
    #[command(flatten)]
    pub house: HouseArgs,

    #[arg(long, default_value_t = 1)]
    pub quantity: i32,
}

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Only finish the checkout that stopped part way
    #[arg(long)]
    pub resume: bool,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub house: HouseArgs,

    /// Extra to price in, repeatable: solar, pool, garage, terrace, smart, garden
    #[arg(long = "with", value_name = "EXTRA")]
    pub customizations: Vec<Customization>,

    #[arg(long)]
    pub message: Option<String>,
}
