use log::{error, info};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use structopt::StructOpt;
use zoning_preview::items::SearchParams;
use zoning_preview::output::{Output, Preview};
use zoning_preview::search::search_catalog;
use zoning_preview::{
    process, HttpFeatureSource, LoadOutcome, PreviewConfig, PreviewError, PreviewLoader,
    PreviewState,
};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "zoning_preview",
    about = "Resolve bounds and district colors of a zoning feature server"
)]
struct Opt {
    /// Feature service URL (.../FeatureServer)
    #[structopt(long, conflicts_with_all = &["state", "county", "file"])]
    url: Option<String>,

    /// State to look up in the built-in catalog, together with --county
    #[structopt(long, requires = "county")]
    state: Option<String>,

    /// County to look up in the built-in catalog, together with --state
    #[structopt(long, requires = "state")]
    county: Option<String>,

    /// Read a saved GeoJSON query response instead of fetching
    #[structopt(long, parse(from_os_str), conflicts_with_all = &["state", "county"])]
    file: Option<PathBuf>,

    /// Write the legend as JSON lines instead of the styled GeoJSON
    #[structopt(long)]
    legend: bool,

    /// Request timeout in seconds
    #[structopt(long, env = "ZONING_PREVIEW_TIMEOUT", default_value = "30")]
    timeout: u64,
}

fn service_url(opt: &Opt) -> Result<String, PreviewError> {
    if let Some(url) = &opt.url {
        return Ok(url.clone());
    }
    match (&opt.state, &opt.county) {
        (Some(state), Some(county)) => {
            let params = SearchParams::new(state, county);
            let timestamp = humantime::format_rfc3339_seconds(SystemTime::now()).to_string();
            let result = search_catalog(&params, &timestamp)
                .into_iter()
                .next()
                .ok_or_else(|| PreviewError::NoSearchResults {
                    state: params.state.clone(),
                    county: params.county.clone(),
                })?;
            info!("using {} ({})", result.title, result.url);
            Ok(result.url)
        }
        _ => Err(PreviewError::InvalidUserInput(
            "one of --url, --state/--county or --file is required".into(),
        )),
    }
}

fn write(preview: &Preview, legend: bool, writer: &mut dyn Write) -> Result<(), PreviewError> {
    if legend {
        preview.write_json_lines(writer)
    } else {
        preview.write_geojson(writer)
    }
}

#[tokio::main]
async fn main() -> Result<(), PreviewError> {
    env_logger::init();
    let opt = Opt::from_args();
    let config = PreviewConfig::default().with_timeout(Duration::from_secs(opt.timeout));

    let stdout = io::stdout();
    let mut handle = BufWriter::new(stdout.lock());

    if let Some(path) = &opt.file {
        let file = File::open(path).map_err(|err| PreviewError::ReadError {
            path: path.clone(),
            message: err.to_string(),
        })?;
        process(file, &mut handle, &config, opt.legend)?;
        handle.flush()?;
        return Ok(());
    }

    let url = service_url(&opt)?;
    let loader = PreviewLoader::new(HttpFeatureSource::new(&config)?, config);
    match loader.load(&url).await {
        LoadOutcome::Applied(PreviewState::Success(preview)) => {
            write(&preview, opt.legend, &mut handle)?
        }
        LoadOutcome::Applied(PreviewState::Error { message, preview }) => {
            error!("{}", message);
            write(&preview, opt.legend, &mut handle)?
        }
        LoadOutcome::Applied(_) | LoadOutcome::Superseded => {}
    }
    handle.flush()?;
    Ok(())
}
