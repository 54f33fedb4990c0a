use super::*;

use image::ImageEncoder;

use crate::model::schema::LayerVariant;

fn png_bytes(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..width * height {
        data.extend_from_slice(&px);
    }
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(&data, width, height, image::ExtendedColorType::Rgba8)
        .unwrap();
    bytes
}

fn layer(asset_cid: &str, format: LayerAssetFormat) -> SelectedLayer {
    SelectedLayer {
        category_id: "base".to_string(),
        order: 0,
        variant: LayerVariant {
            id: asset_cid.to_string(),
            label: asset_cid.to_string(),
            asset_cid: asset_cid.to_string(),
            format,
            traits: None,
            weight: None,
        },
        tint: None,
        opacity: None,
        blend: None,
    }
}

struct MapSource(HashMap<String, Vec<u8>>);

impl AssetSource for MapSource {
    fn fetch(&self, asset_ref: &str) -> TeaResult<Vec<u8>> {
        self.0
            .get(asset_ref)
            .cloned()
            .ok_or_else(|| TeaError::fetch(None, format!("missing '{asset_ref}'")))
    }
}

#[test]
fn rel_path_normalization_rejects_traversal() {
    assert!(normalize_rel_path("/nft/generate/0001.png").is_ok());
    assert!(normalize_rel_path("nft/./0001.png").is_ok());
    assert!(normalize_rel_path("../secrets").is_err());
    assert!(normalize_rel_path("/nft/../../etc/passwd").is_err());
    assert!(normalize_rel_path("/").is_err());
}

#[test]
fn dir_source_reads_relative_to_root() {
    let dir = tempfile::tempdir().unwrap();
    let asset_dir = dir.path().join("nft/generate");
    std::fs::create_dir_all(&asset_dir).unwrap();
    std::fs::write(asset_dir.join("0001.png"), b"pixels").unwrap();

    let source = DirAssetSource::new(dir.path());
    assert_eq!(source.fetch("/nft/generate/0001.png").unwrap(), b"pixels");
    assert!(source.fetch("/nft/generate/0002.png").is_err());
}

#[test]
fn http_source_requires_an_origin_for_root_relative_refs() {
    let source = HttpAssetSource::default();
    assert!(matches!(
        source.fetch("/nft/generate/0001.png"),
        Err(TeaError::Config(_))
    ));
}

#[test]
fn http_source_resolves_through_the_gateway() {
    let source = HttpAssetSource {
        gateway_base_url: Some("https://gw.example/".to_string()),
        origin_base_url: Some("https://tea.example".to_string()),
    };
    assert_eq!(
        source.resolve("bafyasset").unwrap(),
        "https://gw.example/ipfs/bafyasset"
    );
    assert_eq!(
        source.resolve("/nft/generate/0001.png").unwrap(),
        "https://tea.example/nft/generate/0001.png"
    );
}

#[test]
fn prepare_decodes_each_asset_once() {
    let mut assets = HashMap::new();
    assets.insert("red".to_string(), png_bytes(4, 4, [255, 0, 0, 255]));
    let source = MapSource(assets);

    let layers = vec![
        layer("red", LayerAssetFormat::Png),
        layer("red", LayerAssetFormat::Png),
    ];
    let store = PreparedLayerStore::prepare(&source, &layers, 4, 4).unwrap();
    assert_eq!(store.len(), 1);

    let surface = store.surface("red").unwrap();
    assert_eq!(surface.width(), 4);
    assert_eq!(&surface.data()[..4], &[255, 0, 0, 255]);
    assert!(store.surface("blue").is_err());
}

#[test]
fn prepare_resizes_rasters_to_the_canvas() {
    let mut assets = HashMap::new();
    assets.insert("big".to_string(), png_bytes(8, 8, [0, 255, 0, 255]));
    let source = MapSource(assets);

    let layers = vec![layer("big", LayerAssetFormat::Png)];
    let store = PreparedLayerStore::prepare(&source, &layers, 2, 2).unwrap();
    let surface = store.surface("big").unwrap();
    assert_eq!((surface.width(), surface.height()), (2, 2));
}

#[test]
fn prepare_rasterizes_svg_masks() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
        <rect x="0" y="0" width="10" height="10" fill="#000000"/>
    </svg>"##;
    let mut assets = HashMap::new();
    assets.insert("mask".to_string(), svg.as_bytes().to_vec());
    let source = MapSource(assets);

    let layers = vec![layer("mask", LayerAssetFormat::SvgMask)];
    let store = PreparedLayerStore::prepare(&source, &layers, 6, 6).unwrap();
    let surface = store.surface("mask").unwrap();
    assert_eq!((surface.width(), surface.height()), (6, 6));
    // full-bleed rect covers every pixel
    assert!(surface.data().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn garbage_bytes_fail_with_a_decode_error() {
    let mut assets = HashMap::new();
    assets.insert("junk".to_string(), vec![1, 2, 3]);
    let source = MapSource(assets);

    let layers = vec![layer("junk", LayerAssetFormat::Png)];
    assert!(matches!(
        PreparedLayerStore::prepare(&source, &layers, 4, 4),
        Err(TeaError::Decode(_))
    ));
}
