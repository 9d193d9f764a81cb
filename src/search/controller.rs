// src/search/controller.rs

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use log::{debug, info};
use num::{BigInt, Zero};

use crate::error::SearchError;
use crate::factor::factor_pair::FactorPair;
use crate::integer_math::prime_gen::PrimeSampler;
use crate::phase_math::precision::PrecisionContext;
use crate::phase_math::theta::{circular_distance, normalized_phase};
use crate::search::cancellation::CancelToken;
use crate::search::params::SearchParams;

/// Terminal state of one search. Exhaustion and cancellation are ordinary
/// outcomes, not errors: running out of budget says nothing about the
/// strength of the modulus beyond "the heuristic did not find a factor in
/// this many draws".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrackOutcome {
    Found(FactorPair),
    Exhausted { attempts: u64 },
    Cancelled { attempts: u64 },
}

/// Attempts to factor `n` with default cancellation (never trips).
pub fn crack(n: &BigInt, params: &SearchParams) -> Result<CrackOutcome, SearchError> {
    crack_with(n, params, &CancelToken::new())
}

/// Single-threaded sampling loop: draw a prime of the target bit length,
/// admit it if its phase lies within the window of the target phase, then
/// test divisibility and certify the cofactor. Every draw consumes one unit
/// of budget whether or not it is admitted, bounding worst-case runtime.
pub fn crack_with(
    n: &BigInt,
    params: &SearchParams,
    cancel: &CancelToken,
) -> Result<CrackOutcome, SearchError> {
    params.validate()?;
    let mut sampler = PrimeSampler::new()?;
    let target_bits = validate_modulus(n, &mut sampler)?;
    let ctx = context_for(n, params);
    let target_phase = normalized_phase(&ctx, n, params.warp_k);
    log_search_start(n, target_bits, target_phase, &ctx, params);

    for attempt in 0..params.max_attempts {
        if cancel.is_cancelled() {
            info!("search cancelled after {} attempts", attempt);
            return Ok(CrackOutcome::Cancelled { attempts: attempt });
        }
        if let Some(pair) = sample_once(n, &ctx, target_phase, target_bits, params, &mut sampler)? {
            info!("factor pair located after {} attempts: {}", attempt + 1, pair);
            return Ok(CrackOutcome::Found(pair));
        }
    }
    info!("budget of {} attempts exhausted with no factor", params.max_attempts);
    Ok(CrackOutcome::Exhausted { attempts: params.max_attempts })
}

/// Parallel variant: independent workers share only the attempt counter and
/// the early-success flag. Each worker owns its sampler and entropy stream;
/// phases of candidates need no synchronization at all.
pub fn crack_parallel(
    n: &BigInt,
    params: &SearchParams,
    threads: Option<usize>,
    cancel: &CancelToken,
) -> Result<CrackOutcome, SearchError> {
    params.validate()?;
    let workers = threads.unwrap_or_else(num_cpus::get).max(1);
    if workers == 1 {
        return crack_with(n, params, cancel);
    }

    let mut precheck = PrimeSampler::new()?;
    let target_bits = validate_modulus(n, &mut precheck)?;
    let ctx = context_for(n, params);
    let target_phase = normalized_phase(&ctx, n, params.warp_k);
    log_search_start(n, target_bits, target_phase, &ctx, params);
    info!("sampling across {} workers", workers);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| SearchError::ThreadPool(e.to_string()))?;

    let attempts = AtomicU64::new(0);
    let found = AtomicBool::new(false);
    let failed = AtomicBool::new(false);
    let result: Mutex<Option<FactorPair>> = Mutex::new(None);
    let failure: Mutex<Option<SearchError>> = Mutex::new(None);

    pool.scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|_| {
                let mut sampler = match PrimeSampler::new() {
                    Ok(sampler) => sampler,
                    Err(e) => return record_failure(&failure, &failed, e),
                };
                loop {
                    if found.load(Ordering::SeqCst)
                        || failed.load(Ordering::SeqCst)
                        || cancel.is_cancelled()
                    {
                        break;
                    }
                    let attempt = attempts.fetch_add(1, Ordering::SeqCst);
                    if attempt >= params.max_attempts {
                        break;
                    }
                    match sample_once(n, &ctx, target_phase, target_bits, params, &mut sampler) {
                        Ok(Some(pair)) => {
                            let mut slot = result.lock().unwrap();
                            if slot.is_none() {
                                *slot = Some(pair);
                            }
                            found.store(true, Ordering::SeqCst);
                            break;
                        }
                        Ok(None) => {}
                        Err(e) => {
                            record_failure(&failure, &failed, e);
                            break;
                        }
                    }
                }
            });
        }
    });

    if let Some(e) = failure.into_inner().unwrap() {
        return Err(e);
    }
    if let Some(pair) = result.into_inner().unwrap() {
        info!("factor pair located: {}", pair);
        return Ok(CrackOutcome::Found(pair));
    }
    let spent = attempts.load(Ordering::SeqCst).min(params.max_attempts);
    if cancel.is_cancelled() {
        info!("search cancelled after {} attempts", spent);
        Ok(CrackOutcome::Cancelled { attempts: spent })
    } else {
        info!("budget of {} attempts exhausted with no factor", params.max_attempts);
        Ok(CrackOutcome::Exhausted { attempts: spent })
    }
}

/// One sampling iteration. Returns Ok(None) for a discarded candidate: not
/// admitted by the window, admitted but not a divisor, or a divisor whose
/// cofactor failed certification (which would mean n has more than two prime
/// factors, or the candidate was a false positive).
fn sample_once(
    n: &BigInt,
    ctx: &PrecisionContext,
    target_phase: f64,
    target_bits: u64,
    params: &SearchParams,
    sampler: &mut PrimeSampler,
) -> Result<Option<FactorPair>, SearchError> {
    let candidate = sampler.random_prime(target_bits)?;
    let candidate_phase = normalized_phase(ctx, &candidate, params.warp_k);
    let distance = circular_distance(candidate_phase, target_phase);
    if distance > params.eps {
        return Ok(None);
    }
    debug!("candidate {} admitted at distance {:.6}", candidate, distance);
    if !(n % &candidate).is_zero() {
        return Ok(None);
    }
    let cofactor = n / &candidate;
    if sampler.is_probable_prime(&cofactor) {
        Ok(Some(FactorPair::new(candidate, cofactor)))
    } else {
        debug!(
            "divisor {} found but cofactor {} failed certification",
            candidate, cofactor
        );
        Ok(None)
    }
}

/// Precondition checks, run before any sampling: n must be an integer above
/// 1, wide enough to define a target factor size, and not itself prime.
/// Returns the target candidate bit length ceil(bits(n) / 2) — a balanced
/// semiprime of two b-bit factors has 2b or 2b - 1 bits, and only the
/// ceiling recovers b in both cases.
fn validate_modulus(n: &BigInt, sampler: &mut PrimeSampler) -> Result<u64, SearchError> {
    if n <= &BigInt::from(1) {
        return Err(SearchError::ModulusOutOfRange(n.clone()));
    }
    let bits = n.bits();
    if bits < 4 {
        return Err(SearchError::ModulusTooSmall(bits));
    }
    if sampler.is_probable_prime(n) {
        return Err(SearchError::ModulusPrime);
    }
    Ok((bits + 1) / 2)
}

fn context_for(n: &BigInt, params: &SearchParams) -> PrecisionContext {
    match params.precision_digits {
        Some(digits) => PrecisionContext::new(digits),
        None => PrecisionContext::for_modulus(n, params.eps),
    }
}

fn log_search_start(
    n: &BigInt,
    target_bits: u64,
    target_phase: f64,
    ctx: &PrecisionContext,
    params: &SearchParams,
) {
    info!(
        "phase search: modulus of {} bits, target factors of {} bits, \
         target phase {:.6}, k = {}, eps = {}, budget = {}, precision = {} digits",
        n.bits(),
        target_bits,
        target_phase,
        params.warp_k,
        params.eps,
        params.max_attempts,
        ctx.digits()
    );
}

fn record_failure(slot: &Mutex<Option<SearchError>>, flag: &AtomicBool, err: SearchError) {
    let mut guard = slot.lock().unwrap();
    if guard.is_none() {
        *guard = Some(err);
    }
    flag.store(true, Ordering::SeqCst);
}
