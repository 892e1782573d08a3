pub(crate) mod publish_mirror_status;

pub use publish_mirror_status::PublishMirrorStatusInterface;
#[cfg(any(test, feature = "testkit"))]
pub use publish_mirror_status::MockPublishMirrorStatusInterface;
