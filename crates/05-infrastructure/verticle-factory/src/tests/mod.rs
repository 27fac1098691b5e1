//! 容器 Verticle 工厂测试
