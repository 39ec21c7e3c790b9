use std::path::PathBuf;
use std::process;

use clap::Parser;
use serde_json::{Map as JsonMap, Value as JsonValue};
use sims_core::Neighborhood;
use sims_core::compatibility::rank_compatibility;
use sims_render::{
    compatibility_to_json, family_of, family_to_json, render_compatibility_listing,
    render_family_listing, render_sim_listing, sim_to_json,
};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// UserData directory holding Neighborhood.iff and Characters/.
    #[arg(long, value_name = "DIR", default_value = "UserData")]
    userdata: PathBuf,
    /// Print the sims.
    #[arg(long)]
    sims: bool,
    /// Print the families.
    #[arg(long)]
    families: bool,
    /// Print the compatibility ranking for the given sim id.
    #[arg(long, value_name = "SIM_ID", allow_hyphen_values = true)]
    compat: Option<i16>,
    /// Emit JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    let neighborhood = Neighborhood::load(&cli.userdata).unwrap_or_else(|e| {
        eprintln!("Error loading {}: {e}", cli.userdata.display());
        process::exit(1);
    });

    if let Some(sim_id) = cli.compat {
        let sim = neighborhood.sim_by_id(sim_id).unwrap_or_else(|| {
            eprintln!("Sim with id {sim_id} not found");
            process::exit(1);
        });
        let rankings = rank_compatibility(sim, &neighborhood.sims);

        if cli.json {
            let mut out = JsonMap::new();
            out.insert("sim_id".to_string(), JsonValue::from(sim_id));
            out.insert(
                "rankings".to_string(),
                JsonValue::Array(
                    rankings
                        .iter()
                        .map(|ranking| {
                            let candidate = neighborhood
                                .sim_by_id(ranking.sim_id)
                                .map(|other| {
                                    sim_to_json(other, family_of(&neighborhood.families, other))
                                })
                                .unwrap_or(JsonValue::Null);
                            compatibility_to_json(ranking, candidate)
                        })
                        .collect(),
                ),
            );
            print_json(JsonValue::Object(out));
        } else {
            print!(
                "{}",
                render_compatibility_listing(&rankings, &neighborhood.sims)
            );
        }
        return;
    }

    let show_sims = cli.sims || !cli.families;
    let show_families = cli.families || !cli.sims;

    if cli.json {
        let mut out = JsonMap::new();
        if show_sims {
            out.insert(
                "sims".to_string(),
                JsonValue::Array(
                    neighborhood
                        .sims
                        .iter()
                        .map(|sim| sim_to_json(sim, family_of(&neighborhood.families, sim)))
                        .collect(),
                ),
            );
        }
        if show_families {
            out.insert(
                "families".to_string(),
                JsonValue::Array(neighborhood.families.iter().map(family_to_json).collect()),
            );
        }
        print_json(JsonValue::Object(out));
        return;
    }

    if show_sims {
        print!(
            "{}",
            render_sim_listing(&neighborhood.sims, &neighborhood.families)
        );
    }
    if show_families {
        if show_sims {
            println!();
        }
        print!("{}", render_family_listing(&neighborhood.families));
    }
}

fn print_json(value: JsonValue) {
    let rendered = serde_json::to_string_pretty(&value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}
