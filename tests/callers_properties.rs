//! Property-based tests for caller field extraction

use call_consensus::{CallSupport, CallerKind, RawVariantRecord};
use proptest::prelude::*;

fn raw(line: String) -> RawVariantRecord {
    RawVariantRecord::new(1, line.split('\t').map(String::from).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// MuSE AF is AD/DP rounded to four decimals
    #[test]
    fn prop_muse_af(dp in 1u64..10_000, alt_frac in 0.0f64..=1.0) {
        let ad = (dp as f64 * alt_frac) as u64;
        let record = raw(format!(
            "chr1\t100\t.\tA\tG\t.\tPASS\tSOMATIC\tGT:DP:AD:BQ:SS\t0/1:{}:{},{}:30,30:2\t0/0:40:40,0:30:0",
            dp, dp - ad, ad
        ));
        let support = CallerKind::Muse.support(&record).unwrap();

        prop_assert_eq!(support.ad, ad);
        prop_assert_eq!(support.dp, dp);
        prop_assert!((support.af - ad as f64 / dp as f64).abs() <= 0.00005 + 1e-12);
        prop_assert_eq!(support.af, (support.af * 10_000.0).round() / 10_000.0);
    }

    /// Varscan AD never exceeds DP and is the floor of DP * AF
    #[test]
    fn prop_varscan_floor(dp in 0u64..100_000, af_permille in 0u32..=1000) {
        let af = f64::from(af_permille) / 1000.0;
        let record = raw(format!(
            "chr2\t5\t.\tG\tA\t.\tPASS\tAF={};DP={};SOMATIC;SS=2\tGT:AD\t0/0:10,0\t0/1:5,5",
            af, dp
        ));
        let support = CallerKind::Varscan.support(&record).unwrap();

        prop_assert_eq!(support.dp, dp);
        prop_assert_eq!(support.af, af);
        prop_assert_eq!(support.ad, (dp as f64 * af).floor() as u64);
        prop_assert!(support.ad <= dp);
    }

    /// Strelka SNV AF is a fraction and AD rounds DP * AF up
    #[test]
    fn prop_strelka_snv_bounds(
        dp in 0u64..5_000,
        alt_reads in 0u64..500,
        ref_reads in 0u64..500,
    ) {
        let record = raw(format!(
            "chr1\t100\t.\tC\tT\t.\tPASS\tSOMATIC\tDP:FDP:SDP:SUBDP:AU:CU:GU:TU\t\
             40:0:0:0:0,0:{},{}:0,0:0,0\t{}:0:0:0:0,0:0,0:0,0:{},{}",
            ref_reads, ref_reads, dp, alt_reads, alt_reads
        ));
        let support = CallerKind::Strelka.support(&record).unwrap();

        prop_assert!((0.0..=1.0).contains(&support.af));
        prop_assert_eq!(support.dp, dp);
        if alt_reads + ref_reads == 0 {
            prop_assert_eq!(support, CallSupport::new(0, dp, 0.0));
        } else {
            let af = alt_reads as f64 / (alt_reads + ref_reads) as f64;
            prop_assert_eq!(support.af, af);
            prop_assert_eq!(support.ad, (dp as f64 * af).ceil() as u64);
            prop_assert!(support.ad <= dp);
        }
    }

    /// Mutect2 values are read as reported from the second sample
    #[test]
    fn prop_mutect2_as_reported(ad in 0u64..1_000, dp in 0u64..1_000, af_permille in 0u32..=1000) {
        let af = f64::from(af_permille) / 1000.0;
        let record = raw(format!(
            "chr1\t100\t.\tA\tG\t.\tPASS\tDP=60\tGT:AD:AF:DP\t0/0:30,0:0.03:30\t0/1:7,{}:{}:{}",
            ad, af, dp
        ));
        prop_assert_eq!(CallerKind::Mutect2.support(&record).unwrap(), CallSupport::new(ad, dp, af));
    }
}
