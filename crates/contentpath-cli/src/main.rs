use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use contentpath_core::{
	ContentUri, DocumentId, HostPlatform, InMemoryRecords, PathResolver, PlatformCapabilities,
	PlatformConfig, ProviderFamily, Record, RecordSource, Resolution, SqliteRecords,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "contentpath", version, about = "Resolve content handles to filesystem paths")]
struct Cli {
	/// Enable debug logging
	#[arg(short, long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Resolve one or more handles to paths
	Resolve {
		/// Handles such as content://… or file://…
		#[arg(required = true)]
		uris: Vec<String>,
		#[command(flatten)]
		platform: PlatformArgs,
		#[command(flatten)]
		store: StoreArgs,
		/// Print resolutions as JSON
		#[arg(long)]
		json: bool,
	},
	/// Show which provider family an authority belongs to
	Classify {
		authority: String,
	},
	/// Show how a handle decomposes
	Inspect {
		uri: String,
		#[command(flatten)]
		platform: PlatformArgs,
	},
	/// Manage the SQLite record store
	Records {
		#[command(subcommand)]
		action: RecordsAction,
	},
}

#[derive(Subcommand, Debug)]
enum RecordsAction {
	/// Add a single row
	Add {
		/// Database file (defaults to ~/.contentpath/records.db)
		#[arg(long)]
		db: Option<PathBuf>,
		/// Collection or handle the row belongs to
		#[arg(long)]
		target: String,
		#[arg(long)]
		id: Option<u64>,
		/// Value of the _data column
		#[arg(long)]
		data: Option<String>,
		/// Value of the _display_name column
		#[arg(long)]
		name: Option<String>,
	},
	/// Import rows from a JSON fixture
	Import {
		#[arg(long)]
		db: Option<PathBuf>,
		fixture: PathBuf,
	},
	/// List stored rows
	List {
		#[arg(long)]
		db: Option<PathBuf>,
	},
}

#[derive(Args, Debug)]
struct PlatformArgs {
	/// Platform config file (defaults to ~/.contentpath/platform.json)
	#[arg(long)]
	config: Option<PathBuf>,
	/// Override the platform SDK level
	#[arg(long)]
	sdk_level: Option<u32>,
	/// Override the external storage root
	#[arg(long)]
	storage_root: Option<String>,
}

#[derive(Args, Debug)]
struct StoreArgs {
	/// JSON fixture to query instead of a database
	#[arg(long, conflicts_with = "db")]
	records: Option<PathBuf>,
	/// SQLite record database (defaults to ~/.contentpath/records.db)
	#[arg(long)]
	db: Option<PathBuf>,
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match cli.command {
		Commands::Resolve { uris, platform, store, json } => {
			let platform = build_platform(&platform)?;
			if let Some(fixture) = store.records {
				let records = InMemoryRecords::load(&fixture)?;
				resolve_all(PathResolver::new(platform, records), &uris, json)?;
			} else {
				let records = open_store(store.db)?;
				resolve_all(PathResolver::new(platform, records), &uris, json)?;
			}
		}
		Commands::Classify { authority } => {
			println!("{}", ProviderFamily::classify(&authority));
		}
		Commands::Inspect { uri, platform } => {
			let platform = build_platform(&platform)?;
			inspect(&platform, &uri)?;
		}
		Commands::Records { action } => match action {
			RecordsAction::Add { db, target, id, data, name } => {
				let store = open_store(db)?;
				let record = Record { id, data, display_name: name };
				store.insert(&target, &record)?;
				println!("✅ Added record to {}", target);
			}
			RecordsAction::Import { db, fixture } => {
				let store = open_store(db)?;
				let rows = InMemoryRecords::load(&fixture)?;
				let count = store.import(&rows)?;
				println!("✅ Imported {} records from {}", count, fixture.display());
			}
			RecordsAction::List { db } => {
				let store = open_store(db)?;
				let rows = store.list()?;
				if rows.is_empty() {
					println!("No records stored.");
				}
				for (target, record) in rows {
					println!(
						"{} _id={} _data={} _display_name={}",
						target,
						record.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
						record.data.as_deref().unwrap_or("-"),
						record.display_name.as_deref().unwrap_or("-"),
					);
				}
			}
		},
	}
	Ok(())
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.init();
}

fn build_platform(args: &PlatformArgs) -> Result<HostPlatform> {
	let mut config = match &args.config {
		Some(path) => PlatformConfig::load(path)?,
		None => PlatformConfig::load_default()?,
	};

	if let Some(level) = args.sdk_level {
		config.sdk_level = level;
	}
	if let Some(root) = &args.storage_root {
		config.external_storage_root = root.clone();
	}

	tracing::debug!("Platform config: {:?}", config);

	Ok(HostPlatform::new(config))
}

fn open_store(db: Option<PathBuf>) -> Result<SqliteRecords> {
	let path = match db {
		Some(path) => path,
		None => SqliteRecords::default_path()?,
	};
	SqliteRecords::open(&path).context(format!("Failed to open record store {}", path.display()))
}

fn resolve_all<S: RecordSource>(
	resolver: PathResolver<HostPlatform, S>,
	uris: &[String],
	json: bool,
) -> Result<()> {
	let mut unresolved = 0;
	let mut results: Vec<(String, Option<Resolution>)> = Vec::new();

	for uri in uris {
		let resolution = resolver.resolve_str(uri);
		if resolution.is_none() {
			unresolved += 1;
		}
		results.push((uri.clone(), resolution));
	}

	if json {
		let output: Vec<_> = results
			.iter()
			.map(|(uri, resolution)| serde_json::json!({ "uri": uri, "resolution": resolution }))
			.collect();
		println!("{}", serde_json::to_string_pretty(&output)?);
	} else {
		for (uri, resolution) in &results {
			match resolution {
				Some(resolution) if resolution.is_local() => println!("{}", resolution.path),
				Some(resolution) => println!("{} (remote reference)", resolution.path),
				None => eprintln!("❌ Unresolved: {}", uri),
			}
		}
	}

	if unresolved > 0 {
		anyhow::bail!("{} of {} handles could not be resolved", unresolved, uris.len());
	}
	Ok(())
}

fn inspect(platform: &HostPlatform, input: &str) -> Result<()> {
	let uri = ContentUri::parse(input)?;
	let family = ProviderFamily::of(uri.authority());

	println!("🔍 {}", uri);
	println!("Scheme:    {}", uri.scheme());
	println!("Authority: {}", uri.authority().unwrap_or("-"));
	println!("Path:      {}", uri.path());
	println!("Raw path:  {}", uri.encoded_path());
	println!("Segments:  {:?}", uri.path_segments());
	println!("Provider:  {}", family);

	if platform.supports_document_handles() {
		match platform.document_id(&uri) {
			Some(raw) => {
				let id = DocumentId::parse(&raw);
				println!("Document:  {} (tag '{}', value '{}')", raw, id.tag(), id.value().unwrap_or("-"));
			}
			None => println!("Document:  not a structured document"),
		}
	} else {
		println!("Document:  platform level {} has no document handles", platform.config().sdk_level);
	}
	Ok(())
}
