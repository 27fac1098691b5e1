//! 容器、Verticle 工厂与部署器的端到端集成测试，测试位于 `tests/` 目录。
