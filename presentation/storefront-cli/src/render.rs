use std::fmt::Write;

use business::domain::cart::checkout::{CheckoutReport, LineOutcome};
use business::domain::cart::state::CartState;
use business::domain::catalog::model::Catalog;
use business::domain::order::model::Order;
use business::domain::quote::model::{Customization, Quote};

/// Cents as `units.cents`.
pub fn price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

pub fn cart(state: &CartState) -> String {
    if state.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut out = String::new();
    for line in state.items() {
        let _ = writeln!(
            out,
            "{}  {} x {} ({}, {})  {}",
            line.id,
            line.quantity,
            line.house_name,
            line.color_name,
            line.size_name,
            price(line.total_price)
        );
    }
    let _ = write!(
        out,
        "{} items, total {}",
        state.total_items(),
        price(state.total_price())
    );
    out
}

pub fn checkout(report: &CheckoutReport) -> String {
    let mut out = String::new();
    for step in &report.steps {
        let outcome = match &step.outcome {
            LineOutcome::Pending => "not attempted".to_string(),
            LineOutcome::Ordered { order_id } => format!("ordered {}", order_id),
            LineOutcome::Failed { reason } => format!("failed: {}", reason),
        };
        let _ = writeln!(
            out,
            "{} x {}  {}",
            step.line.quantity, step.line.house_name, outcome
        );
    }
    let _ = write!(
        out,
        "{} ordered, {} failed, {} pending",
        report.ordered().len(),
        report.failed().len(),
        report.pending().len()
    );
    out
}

pub fn orders(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "No orders yet".to_string();
    }

    orders
        .iter()
        .map(|order| {
            format!(
                "{}  {}  {} x {}  {}  {}",
                order.id,
                order.created_at.format("%Y-%m-%d"),
                order.quantity,
                order.house_id,
                price(order.total_price),
                order.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn catalog(catalog: &Catalog) -> String {
    let mut out = String::from("Houses");
    for house in &catalog.houses {
        let _ = write!(
            out,
            "\n  {}  {}  from {}",
            house.id,
            house.name,
            price(house.base_price)
        );
    }
    out.push_str("\nColors");
    for color in &catalog.colors {
        let _ = write!(
            out,
            "\n  {}  {}  +{}",
            color.id,
            color.name,
            price(color.price_modifier)
        );
    }
    out.push_str("\nSizes");
    for size in &catalog.sizes {
        let _ = write!(
            out,
            "\n  {}  {} {}  +{}",
            size.id,
            size.name,
            size.dimensions,
            price(size.price_modifier)
        );
    }
    out.push_str("\nExtras");
    for extra in Customization::ALL {
        let _ = write!(out, "\n  {}  {}  +{}", extra, extra.label(), price(extra.price()));
    }
    out
}

pub fn quote(quote: &Quote) -> String {
    let extras = if quote.customizations.is_empty() {
        "no extras".to_string()
    } else {
        quote
            .customizations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "{}  {}  {} ({})  {}  {}",
        quote.id,
        quote.created_at.format("%Y-%m-%d"),
        quote.house_id,
        extras,
        price(quote.total_price),
        quote.status
    )
}

pub fn quotes(quotes: &[Quote]) -> String {
    if quotes.is_empty() {
        return "No quotes yet".to_string();
    }
    quotes.iter().map(quote).collect::<Vec<_>>().join("\n")
}
