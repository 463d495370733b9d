mod enums_tests {
    use std::str::FromStr;

    use crate::data_structs::enums::*;

    #[test]
    fn test_strand_from_str() {
        assert_eq!(Strand::from_str("+").unwrap(), Strand::Forward);
        assert_eq!(Strand::from_str("-").unwrap(), Strand::Reverse);
        assert_eq!(Strand::from_str("?").unwrap(), Strand::Unknown);
        assert!(Strand::from_str("forward").is_err());
        assert!(Strand::from_str("").is_err());
    }

    #[test]
    fn test_strand_symbol() {
        assert_eq!(char::from(Strand::Forward), '+');
        assert_eq!(char::from(Strand::Unknown), '?');
        assert_eq!(Strand::Reverse.to_string(), "-");
    }

    #[test]
    fn test_strand_serde() {
        let json = serde_json::to_string(&Strand::Forward).unwrap();
        assert_eq!(json, "\"+\"");
        let strand: Strand = serde_json::from_str("\"?\"").unwrap();
        assert_eq!(strand, Strand::Unknown);
        assert!(serde_json::from_str::<Strand>("\"x\"").is_err());
    }

    #[test]
    fn test_item_kind_display() {
        assert_eq!(ItemKind::Feature.to_string(), "feature");
        assert_eq!(ItemKind::Sequence.to_string(), "sequence");
    }
}

mod feature_tests {
    use std::str::FromStr;

    use rstest::{
        fixture,
        rstest,
    };

    use crate::data_structs::*;

    const EXON: &str = "ctgA\texample\texon\t1050\t1500\t.\t+\t.\ttranscript_id \
                        \"EDEN.1\"; gene_id \"EDEN\";";

    #[fixture]
    fn exon() -> FeatureLine { FeatureLine::from_str(EXON).unwrap() }

    #[rstest]
    fn test_parse_columns(exon: FeatureLine) {
        assert_eq!(exon.seq_id.as_deref(), Some("ctgA"));
        assert_eq!(exon.source.as_deref(), Some("example"));
        assert!(exon.is_type("exon"));
        assert_eq!(exon.start, Some(1050));
        assert_eq!(exon.end, Some(1500));
        assert_eq!(exon.score, None);
        assert_eq!(exon.strand, Some(Strand::Forward));
        assert_eq!(exon.phase, None);
        assert_eq!(exon.attribute("transcript_id"), ["EDEN.1"]);
        assert_eq!(exon.attribute("gene_id"), ["EDEN"]);
        assert!(exon.attribute("Parent").is_empty());
        assert_eq!(exon.n_nested(), 0);
    }

    #[rstest]
    fn test_display(exon: FeatureLine) {
        assert_eq!(exon.to_string(), EXON);
    }

    #[rstest]
    fn test_builder_methods(exon: FeatureLine) {
        let transcript = exon
            .with_feature_type("transcript")
            .with_attribute("ID", vec!["t1".to_string()])
            .without_attribute("gene_id");
        assert!(transcript.is_type("transcript"));
        assert!(transcript.has_attribute("ID"));
        assert!(!transcript.has_attribute("gene_id"));
        assert_eq!(
            transcript
                .attributes
                .keys()
                .collect::<Vec<_>>(),
            ["transcript_id", "ID"]
        );
    }

    #[rstest]
    #[case::child("child_features")]
    #[case::derived("derived_features")]
    #[case::other("evidence")]
    fn test_containers(
        exon: FeatureLine,
        #[case] container: &str,
    ) {
        let mut parent = exon.clone();
        parent
            .container_mut(container)
            .push(Feature::from_line(exon));
        assert_eq!(parent.container(container).len(), 1);
        assert_eq!(parent.n_nested(), 1);
        assert!(parent.container("unknown").is_empty());
    }

    #[rstest]
    fn test_feature_span_and_size(exon: FeatureLine) {
        let mut second = exon.clone();
        second.start = Some(3000);
        second.end = Some(3902);
        let mut first = exon.clone();
        first
            .child_features
            .push(Feature::from_line(exon));

        let feature = Feature::new(vec![first, second]);
        assert_eq!(feature.len(), 2);
        assert_eq!(feature.feature_type(), Some("exon"));
        assert_eq!(feature.span(), (Some(1050), Some(3902)));
        assert_eq!(feature.children().len(), 1);
        assert_eq!(feature.subtree_size(), 2);
    }

    #[test]
    fn test_min_max_pos() {
        assert_eq!(min_pos(Some(3), Some(1)), Some(1));
        assert_eq!(min_pos(None, Some(1)), Some(1));
        assert_eq!(max_pos(Some(3), None), Some(3));
        assert_eq!(max_pos(None, None), None);
    }
}

mod records_tests {
    use std::str::FromStr;

    use serde_json::json;

    use crate::data_structs::*;

    #[test]
    fn test_item_kind() {
        let comment = Item::from(Comment {
            comment: "hello".to_string(),
        });
        assert_eq!(comment.kind(), ItemKind::Comment);
        assert!(comment.as_comment().is_some());
        assert!(comment.as_feature().is_none());

        let directive = Item::from(Directive::new("gff-version".into(), Some("3".into())));
        assert_eq!(directive.kind(), ItemKind::Directive);
        assert!(directive.as_directive().unwrap().is("gff-version"));
    }

    #[test]
    fn test_comment_json() {
        let item = Item::from(Comment {
            comment: "a comment".to_string(),
        });
        assert_eq!(serde_json::to_value(&item).unwrap(), json!({ "comment": "a comment" }));
    }

    #[test]
    fn test_sequence_json() {
        let item = Item::from(Sequence {
            id:          "ctgA".to_string(),
            description: None,
            sequence:    "ACGT".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({ "id": "ctgA", "sequence": "ACGT" })
        );
    }

    #[test]
    fn test_feature_json() {
        let line = FeatureLine::from_str(
            "ctgA\test\tgene\t1\t10\t.\t-\t0\tgene_id \"G\"",
        )
        .unwrap();
        let value = serde_json::to_value(Item::from(Feature::from_line(line))).unwrap();
        assert_eq!(
            value,
            json!([{
                "seq_id": "ctgA",
                "source": "est",
                "type": "gene",
                "start": 1,
                "end": 10,
                "score": null,
                "strand": "-",
                "phase": 0,
                "attributes": { "gene_id": ["G"] },
                "child_features": [],
                "derived_features": []
            }])
        );
    }
}
