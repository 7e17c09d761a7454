/// Pairing engine: turns a batch's unresolved uploads into card pairs
///
/// Planning is pure and runs over an in-memory snapshot of the pool; the
/// plan is then applied through the repositories with per-pair error
/// collection, so one failed insert never aborts the rest of the batch.
use crate::modules::pairing::domain::entities::{CardPair, PairingReport};
use crate::modules::pairing::domain::repository::CardPairRepository;
use crate::modules::pairing::domain::value_objects::PairingMethod;
use crate::modules::uploads::domain::entities::Upload;
use crate::modules::uploads::domain::repository::UploadRepository;
use crate::modules::uploads::domain::value_objects::UploadStatus;
use crate::shared::errors::AppResult;
use crate::{log_debug, log_info};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

const FILENAME_CONFIDENCE: f32 = 0.95;
const SEQUENTIAL_CONFIDENCE: f32 = 0.80;

pub struct PairingEngine {
    uploads: Arc<dyn UploadRepository>,
    pairs: Arc<dyn CardPairRepository>,
}

impl PairingEngine {
    pub fn new(uploads: Arc<dyn UploadRepository>, pairs: Arc<dyn CardPairRepository>) -> Self {
        Self { uploads, pairs }
    }

    /// Pair every unresolved upload of a batch
    ///
    /// Every upload in the pool ends up `paired` or `orphaned`, except those
    /// whose own write failed (they stay `uploaded` and are retried by the
    /// next run). Already-resolved uploads are never considered, which makes
    /// re-running safe.
    pub async fn pair_batch(&self, batch_id: Uuid, profile_id: Uuid) -> AppResult<PairingReport> {
        let pool = self.uploads.find_uploaded_by_batch(batch_id).await?;

        let mut report = PairingReport::default();
        if pool.is_empty() {
            log_debug!("Pairing batch {}: nothing to do", batch_id);
            return Ok(report);
        }

        log_info!(
            "Pairing batch {}: {} unresolved uploads",
            batch_id,
            pool.len()
        );

        let plan = plan_pairs(&pool);

        for planned in &plan.pairs {
            let pair = CardPair::new(
                profile_id,
                batch_id,
                planned.front_upload_id,
                Some(planned.back_upload_id),
                planned.method,
                planned.confidence,
            );

            match self.pairs.insert(&pair).await {
                Ok(_) => {
                    report.pairs_created += 1;
                    for upload_id in [planned.front_upload_id, planned.back_upload_id] {
                        if let Err(e) = self
                            .uploads
                            .update_status(upload_id, UploadStatus::Paired)
                            .await
                        {
                            report
                                .errors
                                .push(format!("Failed to mark upload {} paired: {}", upload_id, e));
                        }
                    }
                }
                Err(e) => {
                    // Both uploads stay `uploaded` so a later run retries them
                    report.errors.push(format!(
                        "Failed to insert pair ({}, {}): {}",
                        planned.front_upload_id, planned.back_upload_id, e
                    ));
                }
            }
        }

        for upload_id in &plan.orphans {
            match self
                .uploads
                .update_status(*upload_id, UploadStatus::Orphaned)
                .await
            {
                Ok(_) => report.orphaned_upload_ids.push(*upload_id),
                Err(e) => report
                    .errors
                    .push(format!("Failed to mark upload {} orphaned: {}", upload_id, e)),
            }
        }

        log_info!(
            "Pairing batch {} complete: {} pairs, {} orphans, {} errors",
            batch_id,
            report.pairs_created,
            report.orphaned_upload_ids.len(),
            report.errors.len()
        );

        Ok(report)
    }
}

/// One pairing decision before persistence
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlannedPair {
    pub front_upload_id: Uuid,
    pub back_upload_id: Uuid,
    pub method: PairingMethod,
    pub confidence: f32,
}

/// Pure output of both strategies over one pool snapshot
#[derive(Debug, Clone, Default)]
pub(crate) struct PairingPlan {
    pub pairs: Vec<PlannedPair>,
    pub orphans: Vec<Uuid>,
}

/// Compiled role-suffix patterns for strategy A
struct SuffixPatterns {
    front: Regex,
    back: Regex,
    one: Regex,
    two: Regex,
}

impl SuffixPatterns {
    fn new() -> Self {
        Self {
            front: Regex::new(r"^(.*)_(front|f)\.([^.]+)$").unwrap(),
            back: Regex::new(r"^(.*)_(back|b)\.([^.]+)$").unwrap(),
            one: Regex::new(r"^(.*)_1\.([^.]+)$").unwrap(),
            two: Regex::new(r"^(.*)_2\.([^.]+)$").unwrap(),
        }
    }

    /// Candidate partner filenames for a role-suffixed name, or None if the
    /// name carries no recognized role suffix
    fn partner_candidates(&self, name: &str) -> Option<Vec<String>> {
        if let Some(caps) = self.front.captures(name) {
            let partner = if &caps[2] == "front" { "back" } else { "b" };
            return Some(vec![format!("{}_{}.{}", &caps[1], partner, &caps[3])]);
        }
        if let Some(caps) = self.back.captures(name) {
            let partner = if &caps[2] == "back" { "front" } else { "f" };
            return Some(vec![format!("{}_{}.{}", &caps[1], partner, &caps[3])]);
        }
        if let Some(caps) = self.one.captures(name) {
            return Some(vec![format!("{}_2.{}", &caps[1], &caps[2])]);
        }
        if let Some(caps) = self.two.captures(name) {
            return Some(vec![format!("{}_1.{}", &caps[1], &caps[2])]);
        }
        None
    }
}

/// True when the filename carries a token that marks the card front
fn has_front_token(name: &str) -> bool {
    name.contains("front") || name.contains("_f.") || name.contains("_1.")
}

/// Run both strategies, in order, over a snapshot of the unresolved pool
///
/// Strategy order matters and must stay filename-before-sequential:
/// suffix matches are higher-confidence and must win the uploads they can
/// claim before the number heuristic sees them.
pub(crate) fn plan_pairs(pool: &[Upload]) -> PairingPlan {
    let names: Vec<String> = pool.iter().map(|u| u.filename.to_lowercase()).collect();
    let mut consumed = vec![false; pool.len()];
    let mut plan = PairingPlan::default();

    // Strategy A: filename role suffixes
    let patterns = SuffixPatterns::new();
    for i in 0..pool.len() {
        if consumed[i] {
            continue;
        }
        let Some(candidates) = patterns.partner_candidates(&names[i]) else {
            continue;
        };

        let partner = (0..pool.len())
            .find(|&j| j != i && !consumed[j] && candidates.iter().any(|c| c == &names[j]));

        if let Some(j) = partner {
            consumed[i] = true;
            consumed[j] = true;
            let (front, back) = if has_front_token(&names[i]) {
                (i, j)
            } else {
                (j, i)
            };
            plan.pairs.push(PlannedPair {
                front_upload_id: pool[front].id,
                back_upload_id: pool[back].id,
                method: PairingMethod::AutoFilename,
                confidence: FILENAME_CONFIDENCE,
            });
        }
    }

    // Strategy B: adjacent sequence numbers, only if at least two uploads remain
    let remaining: Vec<usize> = (0..pool.len()).filter(|&i| !consumed[i]).collect();
    if remaining.len() >= 2 {
        // Lazy prefix + trailing digit run: `img_001` -> key `img`, seq 1.
        // Only the final digit run is stripped; earlier embedded numbers
        // stay part of the group key.
        let seq_re = Regex::new(r"^(.*?)[_\-\s]*(\d+)$").unwrap();

        let mut groups: BTreeMap<String, Vec<(u64, usize)>> = BTreeMap::new();
        for &i in &remaining {
            let base = names[i]
                .rsplit_once('.')
                .map(|(base, _ext)| base)
                .unwrap_or(&names[i]);

            if let Some(caps) = seq_re.captures(base) {
                if let Ok(seq) = caps[2].parse::<u64>() {
                    groups.entry(caps[1].to_string()).or_default().push((seq, i));
                }
            }
            // No trailing digits: falls through to orphaned
        }

        for members in groups.values_mut() {
            members.sort();

            // Greedy two-pointer walk: each number is consumed at most once
            // and the earliest valid adjacent pairing wins. `1,2,3` pairs
            // (1,2) and orphans 3 - never (2,3). No backtracking.
            let mut i = 0;
            while i + 1 < members.len() {
                let (seq_a, idx_a) = members[i];
                let (seq_b, idx_b) = members[i + 1];
                if seq_b == seq_a + 1 {
                    consumed[idx_a] = true;
                    consumed[idx_b] = true;
                    plan.pairs.push(PlannedPair {
                        front_upload_id: pool[idx_a].id,
                        back_upload_id: pool[idx_b].id,
                        method: PairingMethod::AutoSequential,
                        confidence: SEQUENTIAL_CONFIDENCE,
                    });
                    i += 2;
                } else {
                    i += 1;
                }
            }
        }
    }

    plan.orphans = (0..pool.len())
        .filter(|&i| !consumed[i])
        .map(|i| pool[i].id)
        .collect();

    plan
}
