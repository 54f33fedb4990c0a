use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng, rngs::StdRng};
use teaforge::{
    DirAssetSource, FusionParent, LocalGenOptions, RenderOptions, TeaMetadata,
    build_lineage, build_tea_metadata, derive_fusion_colorway, derive_fusion_stats,
    extract_palette, generate_local_layers,
    fusion::pipeline::build_layer_snapshots,
    model::metadata::{BuildMetadataInput, build_flavor_template},
    model::schema::FlavorStats,
    render_tea_image,
};

#[derive(Parser, Debug)]
#[command(name = "teaforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a tea from the bundled local layer stack and render a PNG.
    Generate(GenerateArgs),
    /// Derive fused traits from parent metadata documents.
    Fuse(FuseArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Directory containing the local generator assets (`nft/generate/...`).
    #[arg(long)]
    assets: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write a metadata JSON document here.
    #[arg(long)]
    metadata: Option<PathBuf>,

    /// Seed for deterministic generation; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Force a solid colorway instead of rolling for a gradient.
    #[arg(long, default_value_t = false)]
    solid: bool,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 1024)]
    height: u32,
}

#[derive(Parser, Debug)]
struct FuseArgs {
    /// Parent metadata JSON path; pass twice for a two-parent fusion.
    #[arg(long = "parent", required = true)]
    parents: Vec<PathBuf>,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Fuse(args) => cmd_fuse(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let generation = generate_local_layers(&mut rng, &LocalGenOptions { force_solid: args.solid });

    let source = DirAssetSource::new(&args.assets);
    let mut options = RenderOptions::new(args.width, args.height);
    options.with_png = true;
    let result = render_tea_image(&source, &generation.layers, &options)?;

    let png = result.png.context("render returned no png")?;
    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());

    if let Some(metadata_path) = args.metadata {
        let seed_str = format!("{seed:016x}");
        let template = build_flavor_template(generation.flavors.0, &seed_str, "Common");
        let stats = FlavorStats {
            body: rng.gen_range(0..=100),
            caffeine: rng.gen_range(0..=100),
            sweetness: rng.gen_range(0..=100),
        };
        let image_ref = args
            .out
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.out.display().to_string());

        let metadata = build_tea_metadata(BuildMetadataInput {
            name: template.name,
            description: template.description,
            image_cid: image_ref,
            animation_cid: None,
            external_url: None,
            background_color: None,
            seed: seed_str,
            rank: 0,
            rarity: template.rarity,
            flavor_profile: template.flavor_profile,
            infusion: template.infusion,
            colorway: generation.colorway.clone(),
            layers: build_layer_snapshots(&generation.layers),
            lineage: teaforge::LineageSnapshot::root(),
            stats,
            mix_count: 0,
            additional_attributes: Vec::new(),
        });

        let json = serde_json::to_string_pretty(&metadata).context("serialize metadata")?;
        std::fs::write(&metadata_path, json)
            .with_context(|| format!("write metadata '{}'", metadata_path.display()))?;
        eprintln!("wrote {}", metadata_path.display());
    }

    Ok(())
}

fn cmd_fuse(args: FuseArgs) -> anyhow::Result<()> {
    let mut parents = Vec::with_capacity(args.parents.len());
    for path in &args.parents {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read parent metadata '{}'", path.display()))?;
        let metadata: TeaMetadata = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse parent metadata '{}'", path.display()))?;
        parents.push(FusionParent {
            token_id: None,
            image_cid: None,
            metadata,
            weight: None,
        });
    }

    let palettes: Vec<Vec<String>> = parents
        .iter()
        .map(|parent| extract_palette(&parent.metadata))
        .collect();
    let empty = Vec::new();
    let palette1 = palettes.first().unwrap_or(&empty);
    let palette2 = palettes.get(1).unwrap_or(palette1);

    let stats: Vec<_> = parents
        .iter()
        .map(|parent| parent.metadata.properties.stats)
        .collect();
    let derived = serde_json::json!({
        "colorway": derive_fusion_colorway(palette1, palette2),
        "stats": derive_fusion_stats(&stats),
        "lineage": build_lineage(&parents),
    });

    let json = serde_json::to_string_pretty(&derived).context("serialize fusion traits")?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("write fusion traits '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
