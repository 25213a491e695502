//! Integration tests for layerpack.

use layerpack::{
    Allocator, CollectSink, CsvItemSource, Item, LayerPacker, Mode, PackConfig, Result,
    SubmissionWriter,
};

fn items(list: &[(u64, u32, u32, u32)]) -> Vec<Result<Item>> {
    list.iter()
        .map(|&(id, d1, d2, d3)| Item::new(id, d1, d2, d3))
        .collect()
}

/// Asserts that no two emitted boxes intersect in 3D: boxes whose
/// footprints overlap must occupy disjoint z ranges.
fn assert_no_3d_overlap(sink: &CollectSink) {
    let all: Vec<_> = sink.all_items().collect();
    for (i, a) in all.iter().enumerate() {
        for b in all.iter().skip(i + 1) {
            if a.footprint_overlaps(b) {
                assert!(
                    a.z2() < b.z || b.z2() < a.z,
                    "boxes {} and {} intersect: {:?} vs {:?}",
                    a.id,
                    b.id,
                    a,
                    b
                );
            }
        }
    }
}

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_rollover_stacks_layers() {
        let packer = LayerPacker::default_config();
        let mut sink = CollectSink::new();

        let summary = packer
            .pack(
                items(&[(1, 500, 500, 10), (2, 500, 500, 10), (3, 1000, 1000, 10)]),
                &mut sink,
            )
            .unwrap();

        assert!(summary.all_placed());
        assert_eq!(summary.layers_emitted, 2);
        assert_eq!(summary.max_z, 20);
        assert_eq!(sink.layers[1].z_base, 11);
        assert_no_3d_overlap(&sink);
    }

    #[test]
    fn test_unit_tiling_fills_one_layer() {
        let config = PackConfig::new().with_container_side(10);
        let packer = LayerPacker::new(config).unwrap();
        let mut sink = CollectSink::new();

        let list: Vec<(u64, u32, u32, u32)> = (1..=100).map(|i| (i, 1, 1, 1)).collect();
        let summary = packer.pack(items(&list), &mut sink).unwrap();

        assert!(summary.all_placed());
        assert_eq!(summary.layers_emitted, 1);
        assert_eq!(summary.max_z, 1);
        assert_eq!(sink.layers[0].items.len(), 100);
        assert_no_3d_overlap(&sink);
    }

    #[test]
    fn test_mixed_workload_online_and_batch() {
        let list: Vec<(u64, u32, u32, u32)> = (1..=120)
            .map(|i| {
                let i32u = i as u32;
                (i, 50 + (i32u * 37) % 200, 50 + (i32u * 61) % 150, 5 + i32u % 20)
            })
            .collect();

        for mode in [Mode::Online, Mode::Batch] {
            let config = PackConfig::new().with_mode(mode);
            let packer = LayerPacker::new(config).unwrap();
            let mut sink = CollectSink::new();

            let summary = packer.pack(items(&list), &mut sink).unwrap();

            assert!(summary.all_placed(), "{:?} dropped items", mode);
            assert_no_3d_overlap(&sink);

            // Layers are stacked strictly upward.
            for pair in sink.layers.windows(2) {
                assert!(pair[1].z_base > pair[0].z_max);
            }
        }
    }

    #[test]
    fn test_best_fit_mixed_workload() {
        let config = PackConfig::new()
            .with_mode(Mode::Batch)
            .with_allocator(Allocator::BestFit);
        let packer = LayerPacker::new(config).unwrap();
        let mut sink = CollectSink::new();

        let list: Vec<(u64, u32, u32, u32)> = (1..=80)
            .map(|i| {
                let i32u = i as u32;
                (i, 100 + (i32u * 53) % 300, 80 + (i32u * 29) % 220, 4 + i32u % 12)
            })
            .collect();
        let summary = packer.pack(items(&list), &mut sink).unwrap();

        assert!(summary.all_placed());
        assert_no_3d_overlap(&sink);
    }

    #[test]
    fn test_truncation_accounts_for_every_item() {
        let config = PackConfig::new()
            .with_container_side(10)
            .with_max_layers(2);
        let packer = LayerPacker::new(config).unwrap();
        let mut sink = CollectSink::new();

        let list: Vec<(u64, u32, u32, u32)> = (1..=6).map(|i| (i, 10, 10, 3)).collect();
        let summary = packer.pack(items(&list), &mut sink).unwrap();

        assert!(summary.truncated);
        assert_eq!(summary.layers_emitted, 2);
        assert_eq!(summary.items_placed, 2);
        assert_eq!(summary.items_dropped, 4);
        assert_eq!(summary.items_seen(), 6);
    }

    #[test]
    fn test_reflection_mirrors_even_layers() {
        let packer = LayerPacker::default_config();
        let mut sink = CollectSink::new();

        // Item 1 fills layer 1; item 2 lands alone in layer 2 and gets
        // mirrored from the (1,1) anchor to the far corner.
        packer
            .pack(items(&[(1, 1000, 1000, 5), (2, 100, 100, 5)]), &mut sink)
            .unwrap();

        let second = &sink.layers[1].items[0];
        assert_eq!((second.x, second.y), (901, 901));

        // With mirroring disabled the anchor corner is kept.
        let config = PackConfig::new().with_reflect_alternate(false);
        let packer = LayerPacker::new(config).unwrap();
        let mut sink = CollectSink::new();
        packer
            .pack(items(&[(1, 1000, 1000, 5), (2, 100, 100, 5)]), &mut sink)
            .unwrap();
        assert_eq!((sink.layers[1].items[0].x, sink.layers[1].items[0].y), (1, 1));
    }

    #[test]
    fn test_compaction_drops_into_previous_layer() {
        let config = PackConfig::new().with_reflect_alternate(false);
        let packer = LayerPacker::new(config).unwrap();
        let mut sink = CollectSink::new();

        // Layer 1: a short and a tall box side by side (z_max 10). The
        // layer 2 box over the short support sinks onto it; the one over
        // the tall support stays at the layer base.
        let summary = packer
            .pack(
                items(&[
                    (1, 400, 1000, 2),
                    (2, 400, 1000, 10),
                    (3, 400, 1000, 4),
                    (4, 400, 1000, 4),
                ]),
                &mut sink,
            )
            .unwrap();

        assert!(summary.all_placed());
        let second = &sink.layers[1];
        assert_eq!(second.z_base, 11);

        let over_short = second.items.iter().find(|p| p.id == 3).unwrap();
        let over_tall = second.items.iter().find(|p| p.id == 4).unwrap();
        // Short support tops out at z 2, so the box drops to z 3.
        assert_eq!(over_short.z, 3);
        assert_eq!(over_tall.z, 11);
        assert_eq!(summary.max_z, 14);
        assert_no_3d_overlap(&sink);
    }
}

mod emission_tests {
    use super::*;

    const CSV_INPUT: &str = "\
PresentId,Dimension1,Dimension2,Dimension3
1,500,500,10
2,500,500,10
3,1000,1000,10
4,200,300,6
";

    fn run_submission() -> Vec<u8> {
        let packer = LayerPacker::default_config();

        let source = CsvItemSource::new(CSV_INPUT.as_bytes());
        let max_z = packer.measure(source).unwrap();

        let source = CsvItemSource::new(CSV_INPUT.as_bytes());
        let mut sink = SubmissionWriter::new(Vec::new(), max_z).unwrap();
        packer.pack(source, &mut sink).unwrap();
        sink.into_inner().unwrap()
    }

    #[test]
    fn test_submission_has_one_row_per_item() {
        let bytes = run_submission();
        let text = String::from_utf8(bytes).unwrap();
        // Header plus one record for each of the four items.
        assert_eq!(text.lines().count(), 5);
        for line in text.lines().skip(1) {
            assert_eq!(line.split(',').count(), 25);
        }
    }

    #[test]
    fn test_submission_is_deterministic() {
        assert_eq!(run_submission(), run_submission());
    }

    #[test]
    fn test_z_inversion_puts_first_layer_on_top() {
        let bytes = run_submission();
        let text = String::from_utf8(bytes).unwrap();

        // Item 1 sits in the bottom layer (z 1..=10); inverted against
        // the run-wide max_z of 26 its vertices span z' 26 down to 17.
        let row: Vec<u32> = text
            .lines()
            .nth(1)
            .unwrap()
            .split(',')
            .map(|f| f.parse().unwrap())
            .collect();
        assert_eq!(row[0], 1);
        let z_values: Vec<u32> = row[1..].chunks(3).map(|v| v[2]).collect();
        assert_eq!(z_values.iter().max(), Some(&26));
        assert_eq!(z_values.iter().min(), Some(&17));
    }

    #[test]
    fn test_csv_source_feeds_packer() {
        let packer = LayerPacker::default_config();
        let mut sink = CollectSink::new();
        let source = CsvItemSource::new(CSV_INPUT.as_bytes());

        let summary = packer.pack(source, &mut sink).unwrap();
        assert!(summary.all_placed());
        assert_eq!(summary.items_seen(), 4);
    }
}
