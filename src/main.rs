/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::api::client::RentalApi;
use crate::api::models::{AnnouncementParams, ResponsibilityParams};
use crate::api::session::Session;
use crate::config::config_file::Api;
use crate::core::ledger::{Confirmer, ResolutionLedger};
use crate::core::obligation::{ObligationDraft, ObligationKind, Role};
use crate::core::store::ObligationStore;
use crate::reports::announcement_reporter::AnnouncementReporter;
use crate::reports::obligation_reporter::ObligationReporter;
use crate::reports::resolution_reporter::ResolutionReporter;
use crate::reports::responsibility_reporter::ResponsibilityReporter;
use crate::reports::statistics_reporter::StatisticsReporter;
use crate::reports::table::Table;
use crate::stats::aggregator::{aggregate, month_options, settled_only};
use crate::stats::colors::{color_ramp, EXPENSES, INCOMES};
use crate::util::amount::Amount;
use crate::util::date::{Date, Period};
use anyhow::{bail, Error};
use clap::{Parser, ValueEnum};
use std::fmt;

mod api;
mod config;
mod core;
mod reports;
mod stats;
mod util;

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(name = "rentr", version = "1.0", about = "Rental obligation tracking tool")]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// The record id, for commands that target one
	#[arg(required = false)]
	id: Option<u64>,

	// -----------
	// -- FLAGS --
	// -----------
	/// The property to operate on (default: api.property from config)
	#[arg(short, long)]
	property: Option<u64>,

	/// What the command targets: a transaction, a tenant request, an
	/// announcement, or a responsibility
	#[arg(short, long, value_enum, default_value_t = KindArg::Txn)]
	kind: KindArg,

	/// Reporting month (YYYY-MM); defaults to the current month
	#[arg(short, long)]
	month: Option<String>,

	/// Transaction type, e.g. Rent
	#[arg(short = 't', long = "type")]
	type_name: Option<String>,

	/// Transaction amount, e.g. 1500.00
	#[arg(short, long)]
	amount: Option<String>,

	/// Due date (YYYY-MM-DD); defaults to today
	#[arg(short, long)]
	due: Option<String>,

	/// Who owes the money: tenant or landlord (default: tenant)
	#[arg(long)]
	payee: Option<String>,

	/// Hide the transaction from tenants
	#[arg(long)]
	hidden: bool,

	/// Title for a request, announcement, or responsibility
	#[arg(long)]
	title: Option<String>,

	/// Description (or announcement message)
	#[arg(long = "desc")]
	description: Option<String>,

	/// User id to designate as a confirmer; repeatable
	#[arg(short, long)]
	confirmer: Vec<u64>,

	/// User id for the add-res and rm-res commands
	#[arg(short, long)]
	user: Option<u64>,

	/// Custom config file location (default: ~/.config/rentr/config.toml)
	#[arg(long)]
	config: Option<String>,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if let Some(month) = &self.month {
			Period::from_str(month)?;
		}

		if !self.confirmer.is_empty() && self.command != Directive::Add {
			bail!("--confirmer only applies to the add command");
		}

		if !self.confirmer.is_empty() && self.kind.obligation_kind().is_none()
		{
			bail!("--confirmer only applies to transactions and requests");
		}

		Ok(())
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Txns,  // list transactions for a property
	Reqs,  // list tenant requests for a property
	Anns,  // list announcements for a property
	Resps, // list responsibilities for a property
	Props, // list the caller's properties

	Stats,  // monthly statistics over settled transactions
	Months, // list months available for reporting

	Res,     // list the confirmer checklist for an obligation
	Resolve, // flip your own resolution on an obligation

	Add,    // create a record of the given kind
	Update, // replace a record's fields
	Del,    // delete a record (and, for obligations, its resolutions)

	AddRes, // designate a confirmer on an obligation
	RmRes,  // withdraw a confirmer from an obligation

	Tenants, // list tenants for a property
	Whoami,  // show the profile the backend sees for your token
}

#[derive(ValueEnum, Clone, Copy, PartialEq)]
enum KindArg {
	Txn,
	Req,
	Ann,
	Resp,
}

impl KindArg {
	/// Announcements and responsibilities are not obligations; they have
	/// no amounts, visibility, or resolution workflow.
	fn obligation_kind(self) -> Option<ObligationKind> {
		match self {
			KindArg::Txn => Some(ObligationKind::Transaction),
			KindArg::Req => Some(ObligationKind::Request),
			KindArg::Ann | KindArg::Resp => None,
		}
	}
}

impl fmt::Display for KindArg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			KindArg::Txn => write!(f, "txn"),
			KindArg::Req => write!(f, "req"),
			KindArg::Ann => write!(f, "ann"),
			KindArg::Resp => write!(f, "resp"),
		}
	}
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	args.validate()?;

	let config = config::filesystem::get_config(args.config.as_ref(), true)?;
	let api_config = config.api.unwrap_or_default();

	let session = Session::from_config(&api_config)?;
	let base_url = api_config
		.url
		.clone()
		.unwrap_or_else(|| DEFAULT_API_URL.to_string());
	let api = RentalApi::new(&base_url, session);

	match args.command {
		Directive::Txns => {
			let property = property_id(&args, &api_config)?;
			let store = fetch_transactions(&api, property)?;

			let visible: Vec<_> = store
				.visible_to(api.session().role)
				.into_iter()
				.cloned()
				.collect();
			ObligationReporter::new(visible).print();
		},
		Directive::Reqs => {
			let property = property_id(&args, &api_config)?;
			let requests = api.tenant_requests(property)?;
			ObligationReporter::new(requests).print();
		},
		Directive::Anns => {
			let property = property_id(&args, &api_config)?;
			AnnouncementReporter::new(api.announcements(property)?).print();
		},
		Directive::Resps => {
			let property = property_id(&args, &api_config)?;
			ResponsibilityReporter::new(api.responsibilities(property)?)
				.print();
		},
		Directive::Props => {
			let properties = api.properties()?;

			if properties.is_empty() {
				println!("No properties to display.");
			} else {
				let mut table = Table::new(3);
				table.add_header(vec!["Id", "Name", "Location"]);
				table.add_separator();
				table.right_align(vec![0]);

				for p in &properties {
					table.add_row(vec![
						p.id.to_string(),
						p.name.clone(),
						p.location.clone(),
					]);
				}
				table.print();
			}
		},
		Directive::Stats => {
			let period = match &args.month {
				Some(m) => Period::from_str(m)?,
				None => Period::current(),
			};

			// Without a property, stats cover every property the caller
			// owns; the backend only serves settled transactions there.
			// With one, settle locally from that property's resolutions.
			let settled: Vec<_> = match args.property.or(api_config.property)
			{
				None => api.settled_transactions()?,
				Some(property) => {
					let store = fetch_transactions(&api, property)?;

					let mut ledger = ResolutionLedger::new();
					for obligation in store.all() {
						for resolution in
							api.resolutions(obligation.kind, obligation.id)?
						{
							ledger.insert_fetched(resolution);
						}
					}

					let visible = store.visible_to(api.session().role);
					settled_only(&visible, &ledger)
						.into_iter()
						.cloned()
						.collect()
				},
			};

			let refs: Vec<_> = settled.iter().collect();
			let stats = aggregate(&refs, api.session().role, &period);

			let mut rng = rand::thread_rng();
			let income_colors = color_ramp(&stats.incomes, &INCOMES, &mut rng);
			let expense_colors =
				color_ramp(&stats.expenses, &EXPENSES, &mut rng);

			StatisticsReporter::new(stats, income_colors, expense_colors)
				.print();
		},
		Directive::Months => {
			let property = property_id(&args, &api_config)?;
			let store = fetch_transactions(&api, property)?;

			for period in month_options(&store.visible_to(api.session().role))
			{
				println!("{}", period);
			}
		},
		Directive::Res => {
			let kind = require_obligation_kind(&args)?;
			let id = require_id(&args)?;

			let mut ledger = ResolutionLedger::new();
			for resolution in api.resolutions(kind, id)? {
				ledger.insert_fetched(resolution);
			}

			ResolutionReporter::new(&ledger).print(id);
		},
		Directive::Resolve => {
			let kind = require_obligation_kind(&args)?;
			let id = require_id(&args)?;
			api.toggle_own_resolution(kind, id)?;
			println!("Toggled your resolution on obligation {}.", id);
		},
		Directive::Add => {
			let property = property_id(&args, &api_config)?;

			match args.kind {
				KindArg::Ann => {
					let created = api.create_announcement(
						property,
						&announcement_params(&args)?,
					)?;
					println!("Posted announcement {}.", created.id);
				},
				KindArg::Resp => {
					let created = api.create_responsibility(
						property,
						&responsibility_params(&args)?,
					)?;
					println!("Added responsibility {}.", created.id);
				},
				KindArg::Txn | KindArg::Req => {
					let draft = draft_from_args(&args)?;
					let confirmers =
						gather_confirmers(&api, property, &args)?;

					let report = api.create_with_confirmers(
						property, &draft, confirmers,
					)?;
					println!("Created obligation {}.", report.obligation_id);

					if !report.all_succeeded() {
						for (confirmer, err) in &report.failures {
							println!(
								"Could not designate {} (user {}): {}",
								confirmer.user_name, confirmer.user_id, err
							);
						}
						bail!(
							"{} confirmer designation(s) failed; the obligation itself was created",
							report.failures.len()
						);
					}
				},
			}
		},
		Directive::Update => {
			let id = require_id(&args)?;

			match args.kind {
				KindArg::Ann => {
					api.update_announcement(id, &announcement_params(&args)?)?;
					println!("Updated announcement {}.", id);
				},
				KindArg::Resp => {
					api.update_responsibility(
						id,
						&responsibility_params(&args)?,
					)?;
					println!("Updated responsibility {}.", id);
				},
				KindArg::Txn | KindArg::Req => {
					let draft = draft_from_args(&args)?;
					api.update(id, &draft)?;
					println!("Updated obligation {}.", id);
				},
			}
		},
		Directive::Del => {
			let id = require_id(&args)?;

			match args.kind {
				KindArg::Ann => {
					api.delete_announcement(id)?;
					println!("Deleted announcement {}.", id);
				},
				KindArg::Resp => {
					api.delete_responsibility(id)?;
					println!("Deleted responsibility {}.", id);
				},
				KindArg::Txn | KindArg::Req => {
					let kind = require_obligation_kind(&args)?;
					api.delete(kind, id)?;
					println!(
						"Deleted obligation {} and its resolutions.",
						id
					);
				},
			}
		},
		Directive::AddRes => {
			let kind = require_obligation_kind(&args)?;
			let id = require_id(&args)?;
			let user = require_user(&args)?;
			api.add_confirmer(kind, id, user)?;
			println!("Designated user {} on obligation {}.", user, id);
		},
		Directive::RmRes => {
			let kind = require_obligation_kind(&args)?;
			let id = require_id(&args)?;
			let user = require_user(&args)?;
			api.remove_confirmer(kind, id, user)?;
			println!("Withdrew user {} from obligation {}.", user, id);
		},
		Directive::Tenants => {
			let property = property_id(&args, &api_config)?;
			let tenants = api.tenants(property)?;

			if tenants.is_empty() {
				println!("No tenants on property {}.", property);
			} else {
				let mut table = Table::new(4);
				table.add_header(vec!["Id", "Name", "Email", "Role"]);
				table.add_separator();
				table.right_align(vec![0]);

				for t in &tenants {
					table.add_row(vec![
						t.id.to_string(),
						t.name.clone(),
						t.email.clone(),
						t.role.clone(),
					]);
				}
				table.print();
			}
		},
		Directive::Whoami => {
			let me = api.profile()?;
			println!("{} <{}> ({}, user {})", me.name, me.email, me.role, me.id);
		},
	}

	Ok(())
}

/// Assembles a draft from the flags. Listing-side defaults match what the
/// backend would assume: transactions default to the tenant paying, and
/// requests are always directed at the landlord.
fn draft_from_args(args: &Cli) -> Result<ObligationDraft, Error> {
	let kind = require_obligation_kind(args)?;

	let due_date = match &args.due {
		Some(d) => Date::from_str(d)?,
		None => Date::today(),
	};

	let payee_role = match (&args.payee, kind) {
		(Some(p), _) => Role::from_str(p)?,
		(None, ObligationKind::Transaction) => Role::Tenant,
		(None, ObligationKind::Request) => Role::Landlord,
	};

	let amount = match &args.amount {
		Some(a) => Some(Amount::from_str(a)?),
		None => None,
	};

	let draft = ObligationDraft {
		kind,
		type_name: args.type_name.clone().unwrap_or_default(),
		title: args.title.clone().unwrap_or_default(),
		description: args.description.clone().unwrap_or_default(),
		amount,
		due_date,
		payee_role,
		is_visible_to_tenants: !args.hidden,
	};

	draft.validate()?;
	Ok(draft)
}

/// Resolves --confirmer ids against the property's tenant roster so the
/// fan-out report can name people, not just numbers. Ids outside the
/// roster are still sent; the backend is the authority on who exists.
fn gather_confirmers(
	api: &RentalApi,
	property: u64,
	args: &Cli,
) -> Result<Vec<Confirmer>, Error> {
	if args.confirmer.is_empty() {
		return Ok(vec![]);
	}

	let roster = api.tenants(property)?;

	let mut confirmers = vec![];
	for id in &args.confirmer {
		let confirmer = match roster.iter().find(|t| t.id == *id) {
			Some(t) => Confirmer {
				user_id: t.id,
				user_name: t.name.clone(),
				user_role: Role::from_str(&t.role)?,
			},
			None => Confirmer {
				user_id: *id,
				user_name: format!("user {}", id),
				user_role: Role::Tenant,
			},
		};
		confirmers.push(confirmer);
	}

	Ok(confirmers)
}

/// Pulls a property's transactions into a local store, mirroring the
/// backend's assigned ids.
fn fetch_transactions(
	api: &RentalApi,
	property: u64,
) -> Result<ObligationStore, Error> {
	let mut store = ObligationStore::new();
	for obligation in api.transactions(property)? {
		store.insert_fetched(obligation);
	}
	Ok(store)
}

fn announcement_params(args: &Cli) -> Result<AnnouncementParams, Error> {
	let title = args.title.clone().unwrap_or_default();
	let message = args.description.clone().unwrap_or_default();

	if title.is_empty() {
		bail!("announcement title is required; pass --title");
	}
	if message.is_empty() {
		bail!("announcement message is required; pass --desc");
	}

	Ok(AnnouncementParams { title, message })
}

fn responsibility_params(args: &Cli) -> Result<ResponsibilityParams, Error> {
	let title = args.title.clone().unwrap_or_default();
	if title.is_empty() {
		bail!("responsibility title is required; pass --title");
	}

	let due_date = match &args.due {
		Some(d) => Some(Date::from_str(d)?.to_string()),
		None => None,
	};

	Ok(ResponsibilityParams {
		title,
		description: args.description.clone(),
		due_date,
	})
}

fn require_obligation_kind(args: &Cli) -> Result<ObligationKind, Error> {
	match args.kind.obligation_kind() {
		Some(kind) => Ok(kind),
		None => {
			bail!("this command applies to obligations; pass -k txn or -k req")
		},
	}
}

fn property_id(args: &Cli, api_config: &Api) -> Result<u64, Error> {
	match args.property.or(api_config.property) {
		Some(p) => Ok(p),
		None => {
			bail!("No property specified; pass --property or set api.property in config")
		},
	}
}

fn require_id(args: &Cli) -> Result<u64, Error> {
	match args.id {
		Some(id) => Ok(id),
		None => bail!("No id specified"),
	}
}

fn require_user(args: &Cli) -> Result<u64, Error> {
	match args.user {
		Some(u) => Ok(u),
		None => bail!("No user specified; pass --user"),
	}
}
