use anyhow::Context;

use sintel_rs::{DatasetConfig, DatasetTrait, SintelDataset};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_nanos()
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "configs/sintel.json".to_string());
    let count = match args.next() {
        Some(count) => count
            .parse::<usize>()
            .with_context(|| format!("invalid sample count {:?}", count))?,
        None => 4,
    };
    log::info!("config: {:?}", config_path);

    let config = DatasetConfig::from_json_file(&config_path)
        .with_context(|| format!("failed to load {}", config_path))?;
    let dataset = SintelDataset::new(config).context("failed to open dataset")?;
    log::info!(
        "{}: {} sequences, {} samples",
        SintelDataset::NAME,
        dataset.sequences().len(),
        dataset.len()
    );

    for index in 0..count.min(dataset.len()) {
        let sample = dataset
            .get(index)
            .with_context(|| format!("failed to load sample {}", index))?;
        log::info!(
            "[{}] {} ids={} imgs={:?} projs={:?} poses={:?}",
            sample.data_id,
            dataset.get_sequence_name(index)?,
            sample.ids,
            sample.imgs.shape(),
            sample.projs.shape(),
            sample.poses.shape()
        );
        if let Some(depths) = &sample.depths {
            log::info!("    depths={:?}", depths.shape());
        }
        if let (Some(fwd), Some(bwd)) = (&sample.flows_fwd, &sample.flows_bwd) {
            log::info!("    flows_fwd={:?} flows_bwd={:?}", fwd.shape(), bwd.shape());
        }
    }
    Ok(())
}
