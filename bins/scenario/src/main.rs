//! Tally scenario runner.
//!
//! Replays the worked bookkeeping scenario against the in-memory settlement
//! ledger and logs all three statements after every transaction.

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tally_core::gateway::InMemorySettlement;
use tally_core::transactions::Ledger;
use tally_shared::types::PartyId;
use tally_shared::{AppConfig, LoggingConfig};

/// Counterparties on the settlement ledger.
struct Parties {
    founder: PartyId,
    bank: PartyId,
    supplier: PartyId,
    customer: PartyId,
    employee: PartyId,
    government: PartyId,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let parties = Parties {
        founder: PartyId::new(),
        bank: PartyId::new(),
        supplier: PartyId::new(),
        customer: PartyId::new(),
        employee: PartyId::new(),
        government: PartyId::new(),
    };

    let mut settlement = InMemorySettlement::new();
    for (party, amount) in [
        (parties.founder, 1_000_000),
        (parties.bank, 50_000),
        (parties.customer, 20_000),
    ] {
        settlement.mint(party, amount);
        settlement.approve(party, amount);
    }

    let mut ledger = Ledger::with_config(settlement, &config.ledger)
        .context("Invalid ledger configuration")?;
    info!(
        default_interest_rate_percent = config.ledger.default_interest_rate_percent,
        useful_life_years = config.ledger.useful_life_years,
        "Ledger opened"
    );

    run(&mut ledger, &parties)?;

    info!(
        transactions = ledger.journal().len(),
        custody = ledger.gateway().custody_balance(),
        "Scenario complete"
    );
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

fn run(ledger: &mut Ledger<InMemorySettlement>, p: &Parties) -> anyhow::Result<()> {
    print_statements(ledger, "Opening balances")?;

    ledger.raise_equity(p.founder, 1_000_000)?;
    print_statements(ledger, "Founder buys 1,000,000 of capital stock")?;

    ledger.pay_salary(p.employee, 5_000)?;
    print_statements(ledger, "Salary of 5,000 paid")?;

    let debt_id = ledger.take_long_term_debt(p.bank, 50_000, 10)?;
    print_statements(ledger, "Bank lends 50,000 over 10 years")?;

    ledger.buy_fixed_asset(p.supplier, 10_000, 5_000)?;
    print_statements(ledger, "Fixed asset of 10,000 bought, half on credit")?;

    ledger.buy_inventory(p.supplier, 500, 500)?;
    print_statements(ledger, "Inventory of 500 bought for cash")?;

    ledger.sell_inventory(p.customer, 20_000, 10_000, 500)?;
    print_statements(ledger, "Inventory sold for 20,000, half on credit")?;

    ledger.pay_accounts_payable(p.supplier, 5_000)?;
    print_statements(ledger, "Supplier paid 5,000")?;

    ledger.receive_accounts_receivable(p.customer, 10_000)?;
    print_statements(ledger, "Customer pays 10,000 owed")?;

    let interest = ledger.accrue_interest(debt_id)?;
    ledger.pay_interest_on_long_term_debt(p.bank, interest)?;
    print_statements(ledger, "One year of interest paid")?;

    ledger.depreciate_straight_line()?;
    print_statements(ledger, "Fixed asset depreciated straight-line")?;

    ledger.pay_taxes(p.government, 30)?;
    print_statements(ledger, "Income taxes paid at 30%")?;

    Ok(())
}

fn print_statements(ledger: &Ledger<InMemorySettlement>, step: &str) -> anyhow::Result<()> {
    let balance_sheet = serde_json::to_string(&ledger.balance_sheet()?)?;
    let income_statement = serde_json::to_string(&ledger.income_statement()?)?;
    let cash_flow = serde_json::to_string(&ledger.cash_flow_statement()?)?;

    info!(step, %balance_sheet, "Balance sheet");
    info!(step, %income_statement, "Income statement");
    info!(step, %cash_flow, "Cash flow statement");
    Ok(())
}
