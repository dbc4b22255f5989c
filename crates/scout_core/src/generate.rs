use thiserror::Error;

use crate::category::{lookup, CategoryCode, GenerationPlan, SubAsset};
use crate::Candidate;

pub const CDN_BASE: &str = "https://dl.dir.freefiremobile.com/common";
pub const REGIONS: [&str; 4] = ["SG", "IND", "EU", "NA"];
pub const INDICES: std::ops::RangeInclusive<u32> = 1..=6;

pub const SPLASH_REGION: &str = "Splash";
pub const STORE_REGION: &str = "Store";
pub const IND_STORE_REGION: &str = "IND Store";

const STORE_KINDS: [&str; 3] = ["Banner", "Icon", "Bundle"];
const STORE_EXTENSIONS: [&str; 2] = ["png", "jpg"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("enter an asset name to search")]
    EmptyName,
}

/// Removes every whitespace character; no other sanitization.
pub fn normalize_name(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Normalizes `raw` and rejects names that are empty once whitespace is gone.
pub fn prepare_name(raw: &str) -> Result<String, InputError> {
    let name = normalize_name(raw);
    if name.is_empty() {
        return Err(InputError::EmptyName);
    }
    Ok(name)
}

/// Builds the ordered candidate list for `name` and `category`.
///
/// The name is normalized first; callers are expected to have rejected blank
/// names with [`prepare_name`]. Output is deterministic and not deduplicated.
pub fn generate(name: &str, category: CategoryCode) -> Vec<Candidate> {
    let name = normalize_name(name);

    let (prefix, sub_assets) = match lookup(category).plan {
        GenerationPlan::StoreOnly => return store_candidates(&name),
        GenerationPlan::Wheel { prefix, sub_assets } => (prefix, sub_assets),
    };

    let regional = REGIONS.len() * INDICES.clone().count() * sub_assets.len();
    let mut candidates = Vec::with_capacity(1 + STORE_KINDS.len() * 3 + regional);
    candidates.push(splash_candidate(&name));
    candidates.extend(store_candidates(&name));

    for region in REGIONS {
        for index in INDICES {
            for asset in sub_assets {
                candidates.push(wheel_candidate(&name, prefix, region, index, asset));
            }
        }
    }
    candidates
}

fn splash_candidate(name: &str) -> Candidate {
    Candidate::new(
        format!("{CDN_BASE}/web_event/{name}_splash.jpg"),
        SPLASH_REGION,
        "Splash",
        true,
    )
}

/// Global store variants followed by the IND store variants.
fn store_candidates(name: &str) -> Vec<Candidate> {
    let mut out = Vec::with_capacity(STORE_KINDS.len() * (STORE_EXTENSIONS.len() + 1));
    for kind in STORE_KINDS {
        for ext in STORE_EXTENSIONS {
            out.push(Candidate::new(
                format!("{CDN_BASE}/OB/Store/{name}_{kind}.{ext}"),
                STORE_REGION,
                kind,
                true,
            ));
        }
    }
    for kind in STORE_KINDS {
        out.push(Candidate::new(
            format!("{CDN_BASE}/Local/IND/config/Store/{name}_{kind}_IND.png"),
            IND_STORE_REGION,
            kind,
            true,
        ));
    }
    out
}

fn wheel_candidate(
    name: &str,
    prefix: &str,
    region: &str,
    index: u32,
    asset: &SubAsset,
) -> Candidate {
    let SubAsset { label, extension } = asset;
    Candidate::new(
        format!("{CDN_BASE}/Local/{region}/config/{prefix}{index}_{name}{label}{region}_en.{extension}"),
        region,
        *label,
        false,
    )
}
