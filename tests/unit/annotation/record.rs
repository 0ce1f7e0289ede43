use super::*;

#[test]
fn pasted_annotation_centers_keypoint() {
    let p = Placement {
        x: 10,
        y: 20,
        width: 31,
        height: 8,
    };
    let a = CompositeAnnotation::pasted(7, 0, &p);
    assert_eq!(a.keypoints, Keypoint(25.5, 24.0, VISIBILITY_VISIBLE));
    assert_eq!(a.bbox, [10.0, 20.0, 31.0, 8.0]);
    assert_eq!(a.num_keypoints, 1);
    assert!(a.is_visible());
}

#[test]
fn absent_annotation_is_all_zero() {
    let a = CompositeAnnotation::absent(3, 0);
    assert_eq!(a.bbox, [0.0; 4]);
    assert_eq!(a.keypoints.visibility(), VISIBILITY_ABSENT);
    assert_eq!(a.num_keypoints, 0);
    assert!(!a.is_visible());
}

#[test]
fn serializes_with_coco_keys() {
    let a = CompositeAnnotation::pasted(
        9,
        0,
        &Placement {
            x: 1,
            y: 2,
            width: 4,
            height: 6,
        },
    );
    let v = serde_json::to_value(&a).unwrap();
    assert_eq!(v["image_id"], 9);
    assert_eq!(v["category_id"], 0);
    assert_eq!(v["keypoints"], serde_json::json!([3.0, 5.0, 2]));
    assert_eq!(v["num_keypoints"], 1);
    assert_eq!(v["bbox"], serde_json::json!([1.0, 2.0, 4.0, 6.0]));
    assert_eq!(v["iscrowd"], 0);
    assert_eq!(v["segmentation"], serde_json::json!([]));

    let back: CompositeAnnotation = serde_json::from_value(v).unwrap();
    assert_eq!(back, a);
}
