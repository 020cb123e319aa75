//! Shamir split and reconstruct over byte secrets.

use std::fmt;

use math::prelude::*;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, SharingError};
use crate::gate;
use crate::params;
use crate::poly::{interpolate_at_zero, BytePolynomial};
use crate::sensitive::SensitiveBytes;

/// One share: the evaluation point `index` and the per-byte evaluations.
///
/// Records returned from a split belong to the caller; their contents are
/// overwritten when the record is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ShareRecord {
    pub index: u8,
    pub bytes: Vec<u8>,
}

impl ShareRecord {
    pub fn new(index: u8, bytes: Vec<u8>) -> Self {
        Self { index, bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Debug deliberately omits the share bytes.
impl fmt::Debug for ShareRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShareRecord")
            .field("index", &self.index)
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Splitter for a fixed `(threshold, share_count)` configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecretSharer {
    threshold: usize,
    share_count: usize,
}

impl SecretSharer {
    /// Create a sharing scheme for the provided configuration.
    pub fn new(threshold: usize, share_count: usize) -> Result<Self> {
        params::validate_share_parameters(share_count, threshold)?;
        Ok(SecretSharer {
            threshold,
            share_count,
        })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn share_count(&self) -> usize {
        self.share_count
    }

    /// Split `secret` into records with indices 1..=share_count, emitted in
    /// increasing index order.
    ///
    /// All random coefficients are drawn from the gate in one batch and
    /// tracked by the sensitive-buffer registry; the matrix is overwritten
    /// before this returns. Each byte gets an independent polynomial whose
    /// constant term is that byte.
    pub fn split(&self, secret: &[u8]) -> Result<Vec<ShareRecord>> {
        params::validate_secret_length(secret.len())?;

        let degree = self.threshold - 1;
        let coefficients =
            SensitiveBytes::register(gate::random_bytes(secret.len() * degree)?);

        let mut records: Vec<ShareRecord> = (1..=self.share_count as u8)
            .map(|index| ShareRecord::new(index, vec![0u8; secret.len()]))
            .collect();

        coefficients.with(|matrix| {
            for (position, &secret_byte) in secret.iter().enumerate() {
                let high = &matrix[position * degree..(position + 1) * degree];
                let polynomial = BytePolynomial::new(gf!(secret_byte), high);
                for record in &mut records {
                    record.bytes[position] =
                        polynomial.evaluate(gf!(record.index)).value();
                }
            }
        });
        coefficients.release();

        Ok(records)
    }
}

/// Dedup, cross-check and order decoded records; shared by reconstruction
/// and batch validation.
///
/// Exact duplicates (same index, same bytes) are discarded; records that
/// reuse an index with different bytes are an error. At least two distinct
/// records of uniform length must remain.
pub(crate) fn screen_records(records: Vec<ShareRecord>) -> Result<Vec<ShareRecord>> {
    let mut distinct: Vec<ShareRecord> = Vec::with_capacity(records.len());
    for record in records {
        match distinct.iter().position(|kept| kept.index == record.index) {
            Some(at) if distinct[at].bytes == record.bytes => continue,
            Some(_) => return Err(SharingError::InconsistentShares(record.index)),
            None => distinct.push(record),
        }
    }

    if let Some(first) = distinct.first() {
        let length = first.len();
        if let Some(other) = distinct.iter().find(|record| record.len() != length) {
            return Err(SharingError::InconsistentShareLengths(
                length,
                other.len(),
            ));
        }
    }

    if distinct.len() < 2 {
        return Err(SharingError::InsufficientShares {
            required: 2,
            provided: distinct.len(),
        });
    }

    distinct.sort_by_key(|record| record.index);
    Ok(distinct)
}

/// Recover the secret from decoded records.
///
/// Records carry no threshold, by design: any two or more distinct records
/// of equal length interpolate to *some* byte string, which equals the
/// original secret exactly when at least the original threshold is present.
pub fn reconstruct_secret(records: Vec<ShareRecord>) -> Result<Vec<u8>> {
    let distinct = screen_records(records)?;
    let length = distinct[0].len();

    // Gather the y values into one tracked buffer so the registry owns every
    // surviving copy of decoded share material.
    let mut gathered = Vec::with_capacity(distinct.len() * length);
    for record in &distinct {
        gathered.extend_from_slice(&record.bytes);
    }
    let matrix = SensitiveBytes::register(gathered);
    let xs: Vec<Gf256> = distinct.iter().map(|record| gf!(record.index)).collect();

    let secret = matrix.with(|rows| -> Result<Vec<u8>> {
        let mut secret = Vec::with_capacity(length);
        let mut points: Vec<(Gf256, Gf256)> = Vec::with_capacity(xs.len());
        for position in 0..length {
            points.clear();
            for (row, &x) in xs.iter().enumerate() {
                points.push((x, gf!(rows[row * length + position])));
            }
            secret.push(interpolate_at_zero(&points)?.value());
        }
        for point in &mut points {
            *point = (Gf256::ZERO, Gf256::ZERO);
        }
        Ok(secret)
    });
    matrix.release();
    // distinct records are wiped as they drop here
    secret
}

#[cfg(test)]
mod shamir_tests {
    use super::*;

    fn sharer(threshold: usize, share_count: usize) -> SecretSharer {
        SecretSharer::new(threshold, share_count).unwrap()
    }

    mod share_record_tests {
        use super::*;

        #[test]
        fn debug_output_never_contains_share_bytes() {
            let record = ShareRecord::new(7, vec![0xde, 0xad, 0xbe, 0xef]);
            let rendered = format!("{record:?}");
            assert!(rendered.contains("index: 7"));
            assert!(rendered.contains("len: 4"));
            assert!(!rendered.contains("de"));
            assert!(!rendered.contains("222"));
        }

        #[test]
        fn records_zeroize_on_drop() {
            use zeroize::Zeroize;

            let mut record = ShareRecord::new(3, vec![1, 2, 3]);
            record.zeroize();
            assert_eq!(record.index, 0);
            assert!(record.bytes.is_empty());
        }
    }

    mod split_tests {
        use super::*;

        #[test]
        fn invalid_configurations_are_rejected() {
            assert!(SecretSharer::new(1, 5).is_err());
            assert!(SecretSharer::new(0, 5).is_err());
            assert!(SecretSharer::new(6, 5).is_err());
            assert!(SecretSharer::new(3, 300).is_err());
        }

        #[test]
        fn emits_share_count_records_in_index_order() {
            let shares = sharer(3, 5).split(b"ordered").unwrap();
            assert_eq!(shares.len(), 5);
            for (i, share) in shares.iter().enumerate() {
                assert_eq!(share.index as usize, i + 1);
                assert_eq!(share.len(), 7);
            }
        }

        #[test]
        fn single_byte_secret_still_yields_full_width_shares() {
            let shares = sharer(2, 4).split(b"x").unwrap();
            assert_eq!(shares.len(), 4);
            assert!(shares.iter().all(|share| share.len() == 1));
        }

        #[test]
        fn secret_length_policy_is_enforced() {
            assert!(sharer(2, 2).split(b"").is_err());
            assert!(sharer(2, 2).split(&[b'a'; 65]).is_err());
            assert!(sharer(2, 2).split(&[b'a'; 64]).is_ok());
        }

        #[test]
        fn shares_differ_from_the_secret() {
            // A share equal to the secret would mean every random
            // coefficient was zero; vanishingly unlikely for 16 bytes.
            let secret = b"sixteen byte key";
            let shares = sharer(2, 3).split(secret).unwrap();
            assert!(shares.iter().all(|share| share.bytes != secret));
        }

    }

    mod reconstruct_tests {
        use super::*;

        #[test]
        fn threshold_many_records_recover_the_secret() {
            let secret = b"round trip payload";
            let shares = sharer(3, 5).split(secret).unwrap();
            let recovered =
                reconstruct_secret(shares[..3].to_vec()).unwrap();
            assert_eq!(recovered, secret);
        }

        #[test]
        fn every_record_subset_of_threshold_size_works() {
            let secret = b"subset sweep";
            let shares = sharer(2, 4).split(secret).unwrap();
            for i in 0..shares.len() {
                for j in i + 1..shares.len() {
                    let subset = vec![shares[i].clone(), shares[j].clone()];
                    assert_eq!(reconstruct_secret(subset).unwrap(), secret);
                }
            }
        }

        #[test]
        fn record_order_does_not_matter() {
            let secret = b"order free";
            let shares = sharer(3, 5).split(secret).unwrap();
            let shuffled = vec![shares[4].clone(), shares[0].clone(), shares[2].clone()];
            assert_eq!(reconstruct_secret(shuffled).unwrap(), secret);
        }

        #[test]
        fn exact_duplicates_are_harmless() {
            let secret = b"dup";
            let shares = sharer(2, 3).split(secret).unwrap();
            let with_duplicate =
                vec![shares[0].clone(), shares[0].clone(), shares[1].clone()];
            assert_eq!(reconstruct_secret(with_duplicate).unwrap(), secret);
        }

        #[test]
        fn conflicting_duplicates_fail() {
            let records = vec![
                ShareRecord::new(3, vec![0xaa, 0xaa]),
                ShareRecord::new(3, vec![0xbb, 0xbb]),
            ];
            assert_eq!(
                reconstruct_secret(records),
                Err(SharingError::InconsistentShares(3))
            );
        }

        #[test]
        fn mixed_lengths_fail() {
            let records = vec![
                ShareRecord::new(1, vec![1, 2]),
                ShareRecord::new(2, vec![3, 4, 5]),
            ];
            assert_eq!(
                reconstruct_secret(records),
                Err(SharingError::InconsistentShareLengths(2, 3))
            );
        }

        #[test]
        fn fewer_than_two_distinct_records_fail() {
            assert_eq!(
                reconstruct_secret(Vec::new()),
                Err(SharingError::InsufficientShares {
                    required: 2,
                    provided: 0
                })
            );

            let shares = sharer(2, 2).split(b"ab").unwrap();
            let lone = vec![shares[0].clone(), shares[0].clone()];
            assert_eq!(
                reconstruct_secret(lone),
                Err(SharingError::InsufficientShares {
                    required: 2,
                    provided: 1
                })
            );
        }

        #[test]
        fn below_threshold_reconstruction_is_wrong_but_well_defined() {
            let secret = b"below threshold!";
            let shares = sharer(3, 5).split(secret).unwrap();
            let short = vec![shares[0].clone(), shares[1].clone()];
            let guess = reconstruct_secret(short).unwrap();
            assert_eq!(guess.len(), secret.len());
            // Equality would require a 16-byte coincidence at odds 256^-16.
            assert_ne!(guess, secret);
        }

        #[test]
        fn extra_records_beyond_the_threshold_do_not_hurt() {
            let secret = b"all five";
            let shares = sharer(3, 5).split(secret).unwrap();
            assert_eq!(reconstruct_secret(shares).unwrap(), secret);
        }
    }
}
